//! Text normalization and tokenization.

/// Function words dropped before matching. Fixed at compile time.
const STOP_WORDS: [&str; 38] = [
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "am", "do",
    "does", "did", "will", "would", "can", "could", "should", "to", "of",
    "in", "on", "at", "for", "with", "and", "or", "but", "i", "you", "he",
    "she", "it", "we", "they", "my", "your", "me",
];

/// Lowercase, strip punctuation, collapse whitespace runs to single spaces.
///
/// Total over all input; an empty string normalizes to an empty string.
#[must_use]
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split normalized text into tokens, optionally dropping stop words.
#[must_use]
pub fn tokenize(input: &str, remove_stop_words: bool) -> Vec<String> {
    normalize(input)
        .split_whitespace()
        .filter(|token| !remove_stop_words || !STOP_WORDS.contains(token))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  How's it GOING?!  "), "hows it going");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("one\t\ttwo \n three"), "one two three");
    }

    #[test]
    fn normalize_empty_input_yields_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   ...!!!   "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["Hello, World!", "a  b\tc", "", "Déjà vu?", "123 go"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn tokenize_keeps_stop_words_when_asked() {
        let tokens = tokenize("how do I set up the firewall", false);
        assert_eq!(
            tokens,
            vec!["how", "do", "i", "set", "up", "the", "firewall"]
        );
    }

    #[test]
    fn tokenize_removes_stop_words() {
        let tokens = tokenize("how do I set up the firewall", true);
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"i".to_string()));
        assert!(tokens.contains(&"firewall".to_string()));
    }

    #[test]
    fn tokenize_empty_input_yields_no_tokens() {
        assert!(tokenize("", true).is_empty());
        assert!(tokenize("?!", false).is_empty());
    }
}
