//! Raw response and keyword catalogs supplied by the caller.
//!
//! Catalog entries arrive loosely typed (a topic's responses may be a single
//! string or an array of strings); ingestion normalizes everything into
//! non-empty ordered `Vec<String>`s so downstream code never branches on
//! shape.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;

/// One response string or several, as found in raw catalog data.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(response) => vec![response],
            OneOrMany::Many(responses) => responses,
        }
    }
}

/// Mapping from canonical topic key to one-or-more canned responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl ResponseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic with its response variants.
    ///
    /// Blank responses are dropped; a topic left with no responses is not
    /// stored at all, preserving the "responses never empty" invariant.
    pub fn insert<K, R>(&mut self, key: K, responses: R)
    where
        K: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let responses: Vec<String> = responses
            .into_iter()
            .map(Into::into)
            .filter(|response| !response.trim().is_empty())
            .collect();
        if responses.is_empty() {
            return;
        }
        self.entries.push((key.into(), responses));
    }

    /// Parse a `{topic: response | [responses]}` JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::CatalogParse`] when the input is
    /// not a JSON object of that shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, OneOrMany> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (key, responses) in raw {
            catalog.insert(key, responses.into_vec());
        }
        Ok(catalog)
    }

    pub(crate) fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Mapping from keyword phrase to the topic key it should resolve to.
#[derive(Debug, Clone, Default)]
pub struct KeywordCatalog {
    entries: Vec<(String, String)>,
}

impl KeywordCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword phrase pointing at a topic key.
    ///
    /// Whether the target topic actually exists is checked when the corpus
    /// index is derived; dangling entries are dropped there.
    pub fn insert<P, T>(&mut self, phrase: P, topic_key: T)
    where
        P: Into<String>,
        T: Into<String>,
    {
        self.entries.push((phrase.into(), topic_key.into()));
    }

    /// Parse a `{phrase: topic_key}` JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::CatalogParse`] when the input is
    /// not a JSON object of strings.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for (phrase, topic_key) in raw {
            catalog.insert(phrase, topic_key);
        }
        Ok(catalog)
    }

    pub(crate) fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
