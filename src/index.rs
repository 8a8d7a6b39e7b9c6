//! Derived, pre-tokenized view over the raw catalogs.

use std::collections::HashMap;

use log::debug;

use crate::catalog::{KeywordCatalog, ResponseCatalog};
use crate::text::{normalize, tokenize};

/// A canonical topic with its pre-computed match forms.
#[derive(Debug, Clone)]
pub struct TopicEntry {
    pub key: String,
    pub normalized_key: String,
    pub tokens: Vec<String>,
    pub responses: Vec<String>,
}

/// A keyword phrase with its pre-computed match forms and target topic.
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    pub phrase: String,
    pub normalized_phrase: String,
    pub tokens: Vec<String>,
    pub topic_key: String,
}

/// Read-only index built once per engine instance.
///
/// Only keys and phrases are normalized and tokenized; response text stays
/// opaque to matching.
#[derive(Debug, Default)]
pub struct CorpusIndex {
    topics: Vec<TopicEntry>,
    keywords: Vec<KeywordEntry>,
    by_key: HashMap<String, usize>,
    by_normalized_key: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Derive the index from the raw catalogs.
    ///
    /// Duplicate topic keys keep their first occurrence; keyword entries
    /// whose target topic does not exist are dropped.
    #[must_use]
    pub fn build(responses: &ResponseCatalog, keywords: &KeywordCatalog) -> Self {
        let mut index = Self::default();

        for (key, variants) in responses.entries() {
            if index.by_key.contains_key(key) {
                debug!("Corpus index: duplicate topic key '{key}' ignored");
                continue;
            }
            let normalized_key = normalize(key);
            if normalized_key.is_empty() {
                debug!("Corpus index: topic key '{key}' normalizes to empty, skipped");
                continue;
            }
            let position = index.topics.len();
            index.by_key.insert(key.clone(), position);
            index
                .by_normalized_key
                .entry(normalized_key.clone())
                .or_insert(position);
            index.topics.push(TopicEntry {
                key: key.clone(),
                normalized_key,
                tokens: tokenize(key, true),
                responses: variants.clone(),
            });
        }

        for (phrase, topic_key) in keywords.entries() {
            if !index.by_key.contains_key(topic_key) {
                debug!(
                    "Corpus index: keyword '{phrase}' targets unknown topic '{topic_key}', dropped"
                );
                continue;
            }
            let normalized_phrase = normalize(phrase);
            if normalized_phrase.is_empty() {
                debug!("Corpus index: keyword '{phrase}' normalizes to empty, skipped");
                continue;
            }
            index.keywords.push(KeywordEntry {
                phrase: phrase.clone(),
                normalized_phrase,
                tokens: tokenize(phrase, true),
                topic_key: topic_key.clone(),
            });
        }

        debug!(
            "Corpus index built: {} topics, {} keyword intents",
            index.topics.len(),
            index.keywords.len()
        );
        index
    }

    #[must_use]
    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    #[must_use]
    pub fn keywords(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    /// Look up a topic by its raw key.
    #[must_use]
    pub fn topic(&self, key: &str) -> Option<&TopicEntry> {
        self.by_key.get(key).map(|&position| &self.topics[position])
    }

    /// Look up a topic whose normalized key equals the given normalized text.
    #[must_use]
    pub fn topic_by_normalized_key(&self, normalized: &str) -> Option<&TopicEntry> {
        self.by_normalized_key
            .get(normalized)
            .map(|&position| &self.topics[position])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
