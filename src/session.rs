//! View-model for one annotation session.
//!
//! Owns the authoritative local copy of the text list and tag vocabulary.
//! Each handler is one network round trip followed by a local state patch,
//! so the UI reflects the change without a full refetch. Handlers log
//! failures and return the error with state untouched; the caller decides
//! whether to display or propagate.
//!
//! Handlers are independent await points: nothing serializes a filter
//! change against an in-flight submit, and there is no cancellation. The
//! last completion to land wins.

use std::sync::Arc;
use tracing::{debug, error};

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::model::{FilterCriteria, Tag, TextId};
use crate::store::SessionStore;
use crate::tags::{merge_into_vocabulary, parse_tag_csv, text_ref_vocabulary_of, vocabulary_of};

pub struct Session {
    client: ApiClient,
    store: Arc<SessionStore>,
    dedup_added_tags: bool,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            store: Arc::new(SessionStore::new()),
            dedup_added_tags: config.dedup_added_tags,
        })
    }

    /// Build a session around an existing store, so a view holding slot
    /// subscriptions can share it.
    pub fn with_store(config: &Config, store: Arc<SessionStore>) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            store,
            dedup_added_tags: config.dedup_added_tags,
        })
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Fetch all texts and rebuild the cached list and both tag
    /// vocabularies from server data.
    pub async fn refresh(&self) -> Result<()> {
        let records = match self.client.fetch_texts().await {
            Ok(records) => records,
            Err(e) => {
                error!("failed to fetch texts: {e}");
                return Err(e);
            }
        };

        self.store.available_tags.set(vocabulary_of(&records));
        self.store
            .available_text_tags
            .set(text_ref_vocabulary_of(&records));
        self.store.text_list.set(records);
        Ok(())
    }

    /// Submit the current input as a new text record.
    ///
    /// On success the record is prepended to the local list using the
    /// server-assigned id (no refetch), newly-used tags are set-inserted
    /// into the vocabularies, and all input slots are cleared.
    pub async fn submit(&self) -> Result<()> {
        let input_text = self.store.input_text.get();
        let labels = parse_tag_csv(&self.store.input_tags.get());
        let selected_tag = self.store.selected_tag.get();
        let selected_text_tag = self.store.selected_text_tag.get();

        let tags = assemble_submit_tags(
            &labels,
            selected_tag.as_deref(),
            selected_text_tag.as_deref(),
        );

        let record = match self.client.add_text(&input_text, tags).await {
            Ok(record) => record,
            Err(e) => {
                error!("failed to add text: {e}");
                return Err(e);
            }
        };

        self.store.text_list.update(|texts| texts.insert(0, record));

        let mut new_labels = labels;
        if let Some(tag) = selected_tag {
            new_labels.push(tag);
        }
        self.store
            .available_tags
            .update(|vocab| merge_into_vocabulary(vocab, new_labels));
        if let Some(text_tag) = selected_text_tag {
            self.store
                .available_text_tags
                .update(|vocab| merge_into_vocabulary(vocab, [text_tag]));
        }

        self.store.input_text.set(String::new());
        self.store.input_tags.set(String::new());
        self.store.selected_tag.set(None);
        self.store.selected_text_tag.set(None);
        Ok(())
    }

    /// React to a change in the filter inputs. A non-empty filter replaces
    /// the list with the server-filtered subset; an empty filter shows all.
    pub async fn filter_changed(&self) -> Result<()> {
        let criteria = FilterCriteria {
            tags: self.store.filter_tags.get(),
            text: self.store.filter_text.get(),
        };

        let result = if criteria.is_empty() {
            debug!("empty filter, fetching all texts");
            self.client.fetch_texts().await
        } else {
            self.client
                .filter_texts(criteria.tags.trim(), criteria.text.trim())
                .await
        };

        match result {
            Ok(records) => {
                self.store.text_list.set(records);
                Ok(())
            }
            Err(e) => {
                error!("failed to filter texts: {e}");
                Err(e)
            }
        }
    }

    /// Append tags to one record, patching only that record's cached copy.
    pub async fn add_tags(&self, id: &TextId, new_tags: &str) -> Result<()> {
        let added = match self.client.add_tags(id, new_tags).await {
            Ok(tags) => tags,
            Err(e) => {
                error!("failed to add tags to {id}: {e}");
                return Err(e);
            }
        };

        let dedup = self.dedup_added_tags;
        self.store.text_list.update(|texts| {
            if let Some(record) = texts.iter_mut().find(|record| &record.id == id) {
                if dedup {
                    for label in added {
                        if !record.tags.iter().any(|tag| tag.label() == label) {
                            record.tags.push(Tag::Plain(label));
                        }
                    }
                } else {
                    record.tags.extend(added.into_iter().map(Tag::Plain));
                }
            }
        });
        Ok(())
    }

    /// Replace one record's tag list with the parsed input. Publishes a
    /// fresh list value so subscribers re-render.
    pub async fn update_tags(&self, id: &TextId, new_tags: &str) -> Result<()> {
        let updated = match self.client.update_tags(id, new_tags).await {
            Ok(tags) => tags,
            Err(e) => {
                error!("failed to update tags on {id}: {e}");
                return Err(e);
            }
        };

        self.store.text_list.update(|texts| {
            if let Some(record) = texts.iter_mut().find(|record| &record.id == id) {
                record.tags = updated.into_iter().map(Tag::Plain).collect();
            }
        });
        Ok(())
    }

    /// Send the current NLP query and store the answer. On failure the
    /// previous result stays in place.
    pub async fn run_nlp_query(&self) -> Result<()> {
        let query = self.store.nlp_query.get();
        debug!("running NLP query: {query:?}");

        match self.client.nlp_query(&query).await {
            Ok(nlp) => {
                self.store.nlp_result.set(nlp.response);
                Ok(())
            }
            Err(e) => {
                error!("NLP query failed: {e}");
                Err(e)
            }
        }
    }
}

/// Merge the submit inputs into one tag list: free-text tags first, then
/// the selected tag, then the selected text-reference, in that order.
fn assemble_submit_tags(
    labels: &[String],
    selected_tag: Option<&str>,
    selected_text_tag: Option<&str>,
) -> Vec<Tag> {
    let mut tags: Vec<Tag> = labels.iter().cloned().map(Tag::Plain).collect();
    if let Some(tag) = selected_tag {
        tags.push(Tag::plain(tag));
    }
    if let Some(text_tag) = selected_text_tag {
        tags.push(Tag::text_ref(text_tag));
    }
    tags
}
