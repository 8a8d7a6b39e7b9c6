//! Two-path matching over the corpus index.
//!
//! An exact key hit short-circuits everything. Otherwise the keyword-intent
//! catalog and the whole topic corpus are scored independently and a winner
//! is resolved by threshold and tie-break margin. All constants are tunable
//! parameters kept at their reference values.

use log::debug;
use strum::Display;

use crate::index::CorpusIndex;
use crate::similarity::{fuzzy_token_score, token_overlap};
use crate::text::{normalize, tokenize};

/// Score for a keyword phrase found as a substring of the input.
const KEYWORD_SUBSTRING_SCORE: f64 = 0.90;
/// Weight on token overlap along the keyword path.
const KEYWORD_OVERLAP_WEIGHT: f64 = 0.8;
/// Weight on fuzzy token score along the keyword path.
const KEYWORD_FUZZY_WEIGHT: f64 = 0.75;

/// Score for a topic key found as a substring of the input.
const CORPUS_SUBSTRING_SCORE: f64 = 0.88;
/// Blend weights for the corpus path.
const CORPUS_OVERLAP_WEIGHT: f64 = 0.65;
const CORPUS_FUZZY_WEIGHT: f64 = 0.30;
const CORPUS_LENGTH_WEIGHT: f64 = 0.05;

/// A keyword hit at or above this score may pre-empt the corpus path.
const KEYWORD_PRIORITY_THRESHOLD: f64 = 0.55;
/// Margin a keyword hit must hold over the corpus best to pre-empt it.
const KEYWORD_PRIORITY_MARGIN: f64 = 0.05;
/// Floor below which neither path may win.
const MATCH_THRESHOLD: f64 = 0.62;

/// Canonical greeting/closing words eligible for the greeting shortcut.
const GREETING_WORDS: [&str; 7] =
    ["hello", "hi", "hey", "namaste", "thanks", "bye", "goodbye"];

/// Which path produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchPath {
    Exact,
    Keyword,
    Corpus,
}

/// A single winning topic with its confidence score.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub topic_key: String,
    pub score: f64,
    pub path: MatchPath,
}

/// True for topics whose answers must never be structurally composed.
#[must_use]
pub fn is_greeting_topic(normalized_key: &str) -> bool {
    GREETING_WORDS.contains(&normalized_key)
}

/// Resolve free-form input to the single best topic, if any clears the bar.
#[must_use]
pub fn best_candidate(index: &CorpusIndex, raw_input: &str) -> Option<MatchCandidate> {
    let normalized = normalize(raw_input);
    if normalized.is_empty() {
        debug!("Match: empty input after normalize");
        return None;
    }
    let input_tokens = tokenize(raw_input, true);

    // Exact path: the input is some topic's key, verbatim.
    if let Some(topic) = index.topic_by_normalized_key(&normalized) {
        debug!("Match: exact key hit '{}'", topic.key);
        return Some(MatchCandidate {
            topic_key: topic.key.clone(),
            score: 1.0,
            path: MatchPath::Exact,
        });
    }

    // Greeting shortcut: "hey, quick question..." resolves to the greeting
    // topic outright and skips corpus scoring entirely.
    for word in GREETING_WORDS {
        let followed_by_space = normalized
            .strip_prefix(word)
            .is_some_and(|rest| rest.starts_with(' '));
        if !followed_by_space {
            continue;
        }
        if let Some(topic) = index.topic_by_normalized_key(word) {
            debug!("Match: greeting shortcut '{word}'");
            return Some(MatchCandidate {
                topic_key: topic.key.clone(),
                score: 1.0,
                path: MatchPath::Exact,
            });
        }
    }

    let best_keyword = best_keyword_candidate(index, &normalized, &input_tokens);
    let best_corpus = best_corpus_candidate(index, &normalized, &input_tokens);

    let keyword_score = best_keyword.as_ref().map_or(0.0, |c| c.score);
    let corpus_score = best_corpus.as_ref().map_or(0.0, |c| c.score);
    debug!(
        "Match: best keyword {keyword_score:.3}, best corpus {corpus_score:.3} for '{normalized}'"
    );

    // A strong, specific keyword intent beats a weaker generic corpus match
    // only when it holds the margin; otherwise the better side wins its own
    // threshold or nothing does.
    if keyword_score >= KEYWORD_PRIORITY_THRESHOLD
        && keyword_score >= corpus_score + KEYWORD_PRIORITY_MARGIN
    {
        return best_keyword;
    }
    if corpus_score >= MATCH_THRESHOLD {
        return best_corpus;
    }
    if keyword_score >= MATCH_THRESHOLD {
        return best_keyword;
    }
    debug!("Match: nothing cleared the threshold");
    None
}

fn best_keyword_candidate(
    index: &CorpusIndex,
    normalized: &str,
    input_tokens: &[String],
) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;
    for entry in index.keywords() {
        let score = if normalized == entry.normalized_phrase {
            1.0
        } else if normalized.contains(&entry.normalized_phrase) {
            KEYWORD_SUBSTRING_SCORE
        } else {
            (KEYWORD_OVERLAP_WEIGHT * token_overlap(input_tokens, &entry.tokens)).max(
                KEYWORD_FUZZY_WEIGHT * fuzzy_token_score(input_tokens, &entry.tokens),
            )
        };
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(MatchCandidate {
                topic_key: entry.topic_key.clone(),
                score,
                path: MatchPath::Keyword,
            });
        }
    }
    best
}

fn best_corpus_candidate(
    index: &CorpusIndex,
    normalized: &str,
    input_tokens: &[String],
) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;
    for topic in index.topics() {
        let score = if normalized == topic.normalized_key {
            1.0
        } else if normalized.contains(&topic.normalized_key) {
            CORPUS_SUBSTRING_SCORE
        } else {
            CORPUS_OVERLAP_WEIGHT * token_overlap(input_tokens, &topic.tokens)
                + CORPUS_FUZZY_WEIGHT * fuzzy_token_score(input_tokens, &topic.tokens)
                + CORPUS_LENGTH_WEIGHT * length_penalty(input_tokens, &topic.tokens)
        };
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(MatchCandidate {
                topic_key: topic.key.clone(),
                score,
                path: MatchPath::Corpus,
            });
        }
    }
    best
}

/// Ratio of the shorter token count to the longer; 0 when either is empty.
fn length_penalty(input_tokens: &[String], topic_tokens: &[String]) -> f64 {
    if input_tokens.is_empty() || topic_tokens.is_empty() {
        return 0.0;
    }
    let shorter = input_tokens.len().min(topic_tokens.len());
    let longer = input_tokens.len().max(topic_tokens.len());
    shorter as f64 / longer as f64
}
