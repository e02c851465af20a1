// src/api.rs
// HTTP transport for the annotext backend. Each operation is one
// request/response round trip returning Result; call sites decide
// whether a failure is displayed or propagated.

use reqwest::{header, Client, Method, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::model::{
    AddTextRequest, InsertedResponse, ModifiedResponse, NlpRequest, NlpResponse, Tag, TextId,
    TextRecord,
};
use crate::tags::{as_plain_tags, parse_tag_csv, vocabulary_of};

/// Client for the annotext REST backend.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Config("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Universal request builder for all backend JSON endpoints
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(
            method,
            format!("{}/{}", self.base_url, path.trim_start_matches('/')),
        )
    }

    /// Map non-2xx responses to ApiError::Status, capturing the body
    async fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| "<no body>".into());
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    /// Fetch every text record.
    pub async fn fetch_texts(&self) -> Result<Vec<TextRecord>> {
        debug!("fetching all texts");
        let response = self.request(Method::GET, "get_texts/").send().await?;
        let records: Vec<TextRecord> = Self::checked(response).await?.json().await?;
        debug!("fetched {} texts", records.len());
        Ok(records)
    }

    /// Fetch the deduplicated tag vocabulary across all records.
    pub async fn fetch_available_tags(&self) -> Result<Vec<String>> {
        let records = self.fetch_texts().await?;
        Ok(vocabulary_of(&records))
    }

    /// Create a new text record. The returned record carries the
    /// server-assigned id with the tags as submitted.
    pub async fn add_text(&self, text: &str, tags: Vec<Tag>) -> Result<TextRecord> {
        let body = AddTextRequest {
            text: text.to_string(),
            tags,
        };

        let response = self
            .request(Method::POST, "add_text/")
            .json(&body)
            .send()
            .await?;
        let inserted: InsertedResponse = Self::checked(response).await?.json().await?;

        info!("text added with id {}", inserted.inserted_id);
        Ok(TextRecord {
            id: TextId(inserted.inserted_id),
            text: body.text,
            tags: body.tags,
        })
    }

    /// Fetch records matching a tag list and/or a text search. Both
    /// parameters are passed through raw; the backend splits the csv.
    pub async fn filter_texts(&self, tags: &str, search: &str) -> Result<Vec<TextRecord>> {
        debug!("filtering texts: tags={:?} search={:?}", tags, search);
        let path = format!(
            "get_texts_by_tags_and_text/?tags={}&search={}",
            urlencoding::encode(tags),
            urlencoding::encode(search),
        );

        let response = self.request(Method::GET, &path).send().await?;
        let records: Vec<TextRecord> = Self::checked(response).await?.json().await?;
        Ok(records)
    }

    /// Fetch records matching a tag list only.
    pub async fn filter_texts_by_tags(&self, tags: &str) -> Result<Vec<TextRecord>> {
        let path = format!("get_texts_by_tags/?tags={}", urlencoding::encode(tags));

        let response = self.request(Method::GET, &path).send().await?;
        let records: Vec<TextRecord> = Self::checked(response).await?.json().await?;
        Ok(records)
    }

    /// Replace a record's tag list. Returns the parsed tag list that was
    /// sent (the backend only reports a modified count).
    pub async fn update_tags(&self, id: &TextId, new_tags: &str) -> Result<Vec<String>> {
        let tags = parse_tag_csv(new_tags);

        let response = self
            .request(Method::PATCH, &format!("update_tags/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&as_plain_tags(&tags))
            .send()
            .await?;
        let modified: ModifiedResponse = Self::checked(response).await?.json().await?;

        info!("tags updated on {}: modified_count={}", id, modified.modified_count);
        Ok(tags)
    }

    /// Append tags to a record's tag list. Returns the parsed tag list
    /// that was sent.
    pub async fn add_tags(&self, id: &TextId, new_tags: &str) -> Result<Vec<String>> {
        let tags = parse_tag_csv(new_tags);

        let response = self
            .request(Method::PATCH, &format!("add_tags/{}", id))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&as_plain_tags(&tags))
            .send()
            .await?;
        Self::checked(response).await?;

        debug!("tags appended on {}: {:?}", id, tags);
        Ok(tags)
    }

    /// Run a natural-language query through the backend's NLP endpoint.
    pub async fn nlp_query(&self, query: &str) -> Result<NlpResponse> {
        let body = NlpRequest {
            query: query.to_string(),
        };

        let response = self
            .request(Method::POST, "process_nlp_query/")
            .json(&body)
            .send()
            .await?;
        let nlp: NlpResponse = Self::checked(response).await?.json().await?;
        Ok(nlp)
    }
}
