//! Tag-string parsing and vocabulary maintenance.
//!
//! Tag input arrives as free-text comma lists; the vocabulary is the
//! ordered, deduplicated set of every label seen across fetched records.

use crate::model::{Tag, TextRecord};

/// Parse a comma-separated tag string: split on comma, trim whitespace,
/// drop empty segments. `"a, b ,,c"` parses to `["a", "b", "c"]`.
pub fn parse_tag_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

/// Insert labels into a vocabulary list, skipping ones already present.
/// First-seen order is preserved.
pub fn merge_into_vocabulary(vocabulary: &mut Vec<String>, labels: impl IntoIterator<Item = String>) {
    for label in labels {
        if !vocabulary.contains(&label) {
            vocabulary.push(label);
        }
    }
}

/// All distinct tag labels across a set of records, in first-seen order.
pub fn vocabulary_of(records: &[TextRecord]) -> Vec<String> {
    let mut vocabulary = Vec::new();
    merge_into_vocabulary(
        &mut vocabulary,
        records
            .iter()
            .flat_map(|record| record.tags.iter().map(|tag| tag.label().to_string())),
    );
    vocabulary
}

/// The values of text-reference tags across a set of records, deduplicated
/// in first-seen order.
pub fn text_ref_vocabulary_of(records: &[TextRecord]) -> Vec<String> {
    let mut vocabulary = Vec::new();
    merge_into_vocabulary(
        &mut vocabulary,
        records.iter().flat_map(|record| {
            record.tags.iter().filter_map(|tag| match tag {
                Tag::TextRef(t) => Some(t.value.clone()),
                Tag::Plain(_) => None,
            })
        }),
    );
    vocabulary
}

/// Wrap parsed labels as plain tags for the wire.
pub fn as_plain_tags(labels: &[String]) -> Vec<Tag> {
    labels.iter().cloned().map(Tag::Plain).collect()
}
