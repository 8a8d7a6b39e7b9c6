//! Response variant selection.

use rand::Rng;
use rand::prelude::IndexedRandom;

/// Pick one response variant, uniformly at random when several exist.
///
/// The generator is injected so callers (and tests) can seed it; selection
/// only adds variety and never affects matching. Returns `None` only for an
/// empty list, which the catalog layer already rules out.
pub fn pick_response<'a, R: Rng + ?Sized>(
    responses: &'a [String],
    rng: &mut R,
) -> Option<&'a str> {
    match responses {
        [] => None,
        [only] => Some(only.as_str()),
        many => many.choose(rng).map(String::as_str),
    }
}
