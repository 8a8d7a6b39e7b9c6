//! Engine facade wiring match, pick, and compose into one entry point.

use log::{debug, info};
use rand::Rng;

use crate::catalog::{KeywordCatalog, ResponseCatalog};
use crate::composer::compose_answer;
use crate::index::CorpusIndex;
use crate::matcher::{self, is_greeting_topic};
use crate::picker::pick_response;

/// Stateless query pipeline over an immutable corpus index.
///
/// Built once from the caller's catalogs; every query is a pure read, so a
/// shared `Engine` can serve multiple threads without synchronization.
pub struct Engine {
    index: CorpusIndex,
}

impl Engine {
    /// Derive the corpus index and wrap it. Empty catalogs are legal; the
    /// resulting engine simply never matches.
    #[must_use]
    pub fn new(responses: &ResponseCatalog, keywords: &KeywordCatalog) -> Self {
        Self {
            index: CorpusIndex::build(responses, keywords),
        }
    }

    /// Resolve free-form text to a ready-to-display answer.
    ///
    /// `None` means nothing cleared the confidence thresholds (or the canned
    /// text was unusable); the caller should fall back to its own resolution
    /// path.
    #[must_use]
    pub fn find_match(&self, text: &str) -> Option<String> {
        self.find_match_with_rng(text, &mut rand::rng())
    }

    /// Same as [`Engine::find_match`] with an injected generator, so variant
    /// selection can be made deterministic.
    pub fn find_match_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Option<String> {
        let candidate = matcher::best_candidate(&self.index, text)?;
        let topic = self.index.topic(&candidate.topic_key)?;
        info!(
            "Matched topic '{}' via {} path (score {:.2})",
            topic.key, candidate.path, candidate.score
        );

        let response = pick_response(&topic.responses, rng)?;
        if is_greeting_topic(&topic.normalized_key) {
            debug!("Greeting topic '{}' returned verbatim", topic.key);
            return Some(response.to_string());
        }
        compose_answer(text, &topic.key, response, candidate.score)
    }
}
