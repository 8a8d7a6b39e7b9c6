//! Templated answer composition.
//!
//! Short one-liners pass through untouched. Longer canned text is rebuilt
//! into summary + key points + next-step sections, labeled by the detected
//! intent and confidence. Reused fragments (summary sentence, key points,
//! code blocks) are carried verbatim; only ordering, labels, and wrapping
//! are added.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::language::is_code_switched;
use crate::text::tokenize;

/// Responses at or below this many chars (and newline-free) pass through.
const PASS_THROUGH_MAX_LEN: usize = 160;
/// Summary fallback length when the response never splits into sentences.
const SUMMARY_FALLBACK_LEN: usize = 180;
/// Hard cap on extracted key points.
const MAX_KEY_POINTS: usize = 4;
/// Sentence units shorter than this never become key points.
const MIN_POINT_LEN: usize = 20;

/// Summary line used when the response opens with a code fence.
const CODE_LEAD_IN: &str = "Here is the relevant code snippet:";

/// Input words that mark a how-to question.
const HOW_TO_HINTS: [&str; 8] =
    ["how", "setup", "set", "install", "configure", "steps", "guide", "kaise"];

/// Input words that mark an error report.
const ERROR_HINTS: [&str; 9] = [
    "error", "bug", "issue", "problem", "crash", "fail", "failed", "fix",
    "broken",
];

/// Leading bullet or numbered-list marker.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("list marker pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    HowTo,
    Error,
    General,
}

struct Unit {
    text: String,
    is_code: bool,
}

/// Build the final answer text for a matched topic.
///
/// Returns `None` for an empty or whitespace-only canned response so the
/// caller can fall back to another resolution path.
#[must_use]
pub fn compose_answer(
    raw_input: &str,
    topic_key: &str,
    raw_response: &str,
    confidence: f64,
) -> Option<String> {
    if raw_response.trim().is_empty() {
        debug!("Compose: empty response for topic '{topic_key}'");
        return None;
    }

    if raw_response.chars().count() <= PASS_THROUGH_MAX_LEN && !raw_response.contains('\n') {
        debug!("Compose: pass-through for topic '{topic_key}'");
        return Some(raw_response.to_string());
    }

    let input_tokens = tokenize(raw_input, false);
    let intent = classify_intent(&input_tokens);
    let code_switched = is_code_switched(raw_input, &input_tokens);

    let units = split_units(raw_response);
    let code_units: Vec<&str> = units
        .iter()
        .filter(|unit| unit.is_code)
        .map(|unit| unit.text.as_str())
        .collect();
    let purely_code = !units.is_empty() && units.iter().all(|unit| unit.is_code);

    let summary = if units.first().is_some_and(|unit| unit.is_code) {
        CODE_LEAD_IN.to_string()
    } else if units.len() > 1 {
        units[0].text.clone()
    } else {
        truncate_chars(raw_response.trim(), SUMMARY_FALLBACK_LEN)
    };

    let points = extract_key_points(raw_response, &units);
    debug!(
        "Compose: structured answer for topic '{topic_key}' ({} points, {} code blocks)",
        points.len(),
        code_units.len()
    );

    let mut sections: Vec<String> = Vec::new();
    sections.push(format!("**Quick Summary:** {summary}"));

    if !points.is_empty() && !purely_code {
        let mut block = format!("**{}:**", section_label(intent));
        for (position, point) in points.iter().enumerate() {
            block.push_str(&format!("\n{}. {point}", position + 1));
        }
        sections.push(block);
    }

    for &code in &code_units {
        if !summary.contains(code) {
            sections.push(code.to_string());
        }
    }

    sections.push("---".to_string());
    sections.push(format!(
        "**Confidence:** {}. {}",
        confidence_tag(confidence),
        next_step_hint(intent, code_switched)
    ));

    Some(sections.join("\n\n"))
}

/// Split a response into sentence-like units, keeping fenced code intact.
fn split_units(response: &str) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut rest = response;
    while let Some(start) = rest.find("```") {
        let before = &rest[..start];
        units.extend(sentence_units(before).into_iter().map(|text| Unit {
            text,
            is_code: false,
        }));
        let fenced = &rest[start..];
        // An unterminated fence swallows the remainder as one code unit.
        let code_end = fenced[3..].find("```").map_or(fenced.len(), |pos| pos + 6);
        units.push(Unit {
            text: fenced[..code_end].to_string(),
            is_code: true,
        });
        rest = &fenced[code_end..];
    }
    units.extend(sentence_units(rest).into_iter().map(|text| Unit {
        text,
        is_code: false,
    }));
    units
}

/// Split plain text on sentence-ending punctuation followed by whitespace.
fn sentence_units(text: &str) -> Vec<String> {
    let flattened = text.replace('\n', " ");
    let mut units = Vec::new();
    let mut current = String::new();
    let mut chars = flattened.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|next| next.is_whitespace())
        {
            let unit = current.trim();
            if !unit.is_empty() {
                units.push(unit.to_string());
            }
            current.clear();
        }
    }
    let unit = current.trim();
    if !unit.is_empty() {
        units.push(unit.to_string());
    }
    units
}

/// Pull up to four key points out of the response.
///
/// Existing explicit list lines win (taken verbatim, markers stripped);
/// otherwise sentence units are filtered, de-duplicated, and capped.
fn extract_key_points(raw_response: &str, units: &[Unit]) -> Vec<String> {
    let list_lines = explicit_list_lines(raw_response);
    if list_lines.len() >= 2 {
        return list_lines.into_iter().take(MAX_KEY_POINTS).collect();
    }

    let mut points = Vec::new();
    let mut seen = HashSet::new();
    for unit in units {
        if unit.is_code {
            continue;
        }
        let text = strip_list_marker(&unit.text).trim();
        if text.chars().count() < MIN_POINT_LEN {
            continue;
        }
        let key: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if !seen.insert(key) {
            continue;
        }
        points.push(text.to_string());
        if points.len() == MAX_KEY_POINTS {
            break;
        }
    }
    points
}

/// Markdown bullet or numbered lines outside code fences, markers stripped.
fn explicit_list_lines(response: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_fence = false;
    for line in response.lines() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if LIST_MARKER.is_match(line) {
            lines.push(strip_list_marker(line).trim().to_string());
        }
    }
    lines
}

fn strip_list_marker(line: &str) -> &str {
    LIST_MARKER
        .find(line)
        .map_or(line, |marker| &line[marker.end()..])
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

fn classify_intent(input_tokens: &[String]) -> Intent {
    let has_any = |hints: &[&str]| {
        input_tokens
            .iter()
            .any(|token| hints.contains(&token.as_str()))
    };
    if has_any(&HOW_TO_HINTS) {
        Intent::HowTo
    } else if has_any(&ERROR_HINTS) {
        Intent::Error
    } else {
        Intent::General
    }
}

fn section_label(intent: Intent) -> &'static str {
    match intent {
        Intent::HowTo => "Step-by-Step Guide",
        Intent::Error => "Troubleshooting Steps",
        Intent::General => "Key Details",
    }
}

fn confidence_tag(confidence: f64) -> &'static str {
    if confidence >= 0.85 {
        "High"
    } else if confidence >= 0.70 {
        "Medium"
    } else {
        "Low"
    }
}

fn next_step_hint(intent: Intent, code_switched: bool) -> &'static str {
    match (intent, code_switched) {
        (Intent::HowTo, false) => {
            "Follow the steps in order and ask me if you get stuck anywhere."
        }
        (Intent::HowTo, true) => {
            "In steps ko order mein follow karo, kahin atko toh mujhe batao."
        }
        (Intent::Error, false) => {
            "Try these one at a time and tell me what changes if it persists."
        }
        (Intent::Error, true) => {
            "Ek ek karke try karo aur batao kya change hota hai."
        }
        (Intent::General, false) => "Want more detail on any of this? Just ask.",
        (Intent::General, true) => "Aur detail chahiye toh bas pooch lo.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_PLAIN: &str = "The security panel controls every firewall rule on the device. \
        You can whitelist applications from the connections tab. \
        Blocked attempts are logged for thirty days. \
        Advanced users can export the rule set as JSON. \
        The default profile blocks unknown traffic until you allow it.";

    #[test]
    fn empty_response_composes_to_none() {
        assert!(compose_answer("anything", "topic", "", 0.9).is_none());
        assert!(compose_answer("anything", "topic", "   \n  ", 0.9).is_none());
    }

    #[test]
    fn short_single_line_passes_through_verbatim() {
        let response = "Open Settings > Security to manage the firewall.";
        let composed = compose_answer("firewall?", "security panel", response, 0.9)
            .expect("composed");
        assert_eq!(composed, response);
    }

    #[test]
    fn long_response_is_structured() {
        let composed = compose_answer(
            "how do i set up the firewall",
            "security panel",
            LONG_PLAIN,
            0.90,
        )
        .expect("composed");

        assert!(composed.starts_with(
            "**Quick Summary:** The security panel controls every firewall rule on the device."
        ));
        assert!(composed.contains("**Step-by-Step Guide:**"));
        assert!(composed.contains("**Confidence:** High."));
        assert!(composed.contains("---"));
    }

    #[test]
    fn existing_list_lines_become_the_key_points() {
        let response = "Resetting the router fixes most connection drops.\n\
            - Unplug the router for ten seconds\n\
            - Plug it back in and wait for the status light\n\
            - Reconnect and run a speed test";
        let composed = compose_answer(
            "my wifi keeps dropping, what is the problem",
            "network settings",
            response,
            0.75,
        )
        .expect("composed");

        assert!(composed.contains("**Troubleshooting Steps:**"));
        assert!(composed.contains("1. Unplug the router for ten seconds"));
        assert!(composed.contains("2. Plug it back in and wait for the status light"));
        assert!(composed.contains("3. Reconnect and run a speed test"));
        assert!(!composed.contains("4."));
        assert!(composed.contains("**Confidence:** Medium."));
    }

    #[test]
    fn key_points_are_capped_at_four() {
        let response = "1. First step goes here in detail\n\
            2. Second step goes here in detail\n\
            3. Third step goes here in detail\n\
            4. Fourth step goes here in detail\n\
            5. Fifth step goes here in detail\n\
            6. Sixth step goes here in detail";
        let composed =
            compose_answer("how to configure", "topic", response, 0.9).expect("composed");
        assert!(composed.contains("Fourth step"));
        assert!(!composed.contains("Fifth step"));
        assert!(!composed.contains("Sixth step"));
    }

    #[test]
    fn code_blocks_stay_intact_and_out_of_key_points() {
        let response = "Add the snippet below to your config file. \
            It enables verbose logging for every module at startup time.\n\
            ```toml\n- level = \"debug\"\nfile = \"app.log\"\n```\n\
            Restart the app afterwards so the change is picked up properly.";
        let composed = compose_answer("logging config", "logging", response, 0.9)
            .expect("composed");

        let code = "```toml\n- level = \"debug\"\nfile = \"app.log\"\n```";
        assert_eq!(composed.matches(code).count(), 1);
        assert!(!composed.contains("1. - level"));
        assert!(composed.contains("Restart the app afterwards"));
    }

    #[test]
    fn purely_code_response_gets_lead_in_and_no_points() {
        let response = "```sh\nsystemctl restart networking\nsleep 2\nping example.com\n```";
        let composed =
            compose_answer("restart network", "network settings", response, 0.9)
                .expect("composed");

        assert!(composed.starts_with("**Quick Summary:** Here is the relevant code snippet:"));
        assert!(!composed.contains("**Key Details:**"));
        assert!(composed.contains("systemctl restart networking"));
    }

    #[test]
    fn duplicate_sentences_collapse_into_one_point() {
        let response = "Clear the cache from the storage tab. \
            Clear the cache from the storage tab! \
            Reinstalling is only needed when clearing does not help. \
            You can find the storage tab under the advanced section of settings.";
        let composed = compose_answer("app is slow", "performance", response, 0.9)
            .expect("composed");
        assert_eq!(
            composed.matches("Clear the cache from the storage tab").count(),
            2, // once in the summary, once as a key point
        );
    }

    #[test]
    fn hinglish_input_gets_hinglish_hint_line() {
        let composed = compose_answer(
            "firewall kaise setup karu",
            "security panel",
            LONG_PLAIN,
            0.9,
        )
        .expect("composed");
        assert!(composed.contains("**Step-by-Step Guide:**"));
        assert!(composed.contains("mujhe batao"));
    }

    #[test]
    fn confidence_bands_map_to_tags() {
        for (confidence, tag) in [(0.95, "High"), (0.85, "High"), (0.75, "Medium"), (0.65, "Low")]
        {
            let composed =
                compose_answer("tell me about it", "topic", LONG_PLAIN, confidence)
                    .expect("composed");
            assert!(
                composed.contains(&format!("**Confidence:** {tag}.")),
                "confidence {confidence} should tag {tag}"
            );
        }
    }

    #[test]
    fn general_intent_uses_key_details_label() {
        let composed = compose_answer(
            "tell me about the security panel",
            "security panel",
            LONG_PLAIN,
            0.9,
        )
        .expect("composed");
        assert!(composed.contains("**Key Details:**"));
    }

    #[test]
    fn single_run_on_response_truncates_summary() {
        let words = "word ".repeat(60);
        let response = format!("{words}\n{words}");
        let composed = compose_answer("question", "topic", &response, 0.9).expect("composed");
        let summary_line = composed.lines().next().expect("summary line");
        assert!(summary_line.chars().count() <= "**Quick Summary:** ".len() + 180);
    }
}
