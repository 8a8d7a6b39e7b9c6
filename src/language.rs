//! Code-switched (Hinglish-like) style detection.
//!
//! A coarse binary heuristic: it only decides which phrasing the composer's
//! template lines use, never whether or what the engine matches.

use std::sync::LazyLock;

use regex::Regex;

/// Transliterated Hindi function words commonly mixed into English input.
const HINT_TOKENS: [&str; 40] = [
    "hai", "hain", "kya", "kaise", "kyu", "kyun", "nahi", "nahin", "nhi",
    "ka", "ki", "ke", "ko", "se", "mein", "aur", "ho", "hota", "kar",
    "karo", "karna", "krna", "mujhe", "mera", "meri", "tum", "aap", "apna",
    "bhai", "yaar", "acha", "accha", "theek", "thik", "batao", "bata",
    "chahiye", "matlab", "bahut", "toh",
];

/// Casual shorthand that marks code-switched chat style.
static CASUAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(plz|pls|thx|krdo|karde|btao|bhej|wala|hoga|karna h)\b")
        .expect("casual pattern is valid")
});

/// Returns true when the input reads as code-switched chat.
///
/// No false-negative guarantee; plain English with none of the hint words
/// always comes back false.
#[must_use]
pub fn is_code_switched(raw_input: &str, tokens: &[String]) -> bool {
    if tokens
        .iter()
        .any(|token| HINT_TOKENS.contains(&token.as_str()))
    {
        return true;
    }
    CASUAL_PATTERN.is_match(raw_input)
}
