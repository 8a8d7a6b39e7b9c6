//! Local-first intent resolution and answer composition.
//!
//! Given free-form user text, the engine decides whether it matches a known
//! pre-authored topic and, on a hit, produces a ready-to-display answer
//! string, restructuring long canned text into a summary/key-points format.
//! No network, no model call, no I/O. A `None` from
//! [`Engine::find_match`] tells the caller to fall back to its own
//! resolution path (for example a remote AI provider).

pub mod catalog;
pub mod composer;
pub mod engine;
pub mod error;
pub mod index;
pub mod language;
pub mod matcher;
pub mod picker;
pub mod similarity;
pub mod text;

pub use catalog::{KeywordCatalog, ResponseCatalog};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use matcher::{MatchCandidate, MatchPath};
