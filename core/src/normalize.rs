//! Converts the model's free-form reply into a [`MoodAnalysis`].
//!
//! This is the single point where untrusted, possibly malformed external
//! output becomes data the rest of the system may trust unconditionally.
//! `normalize` never fails: a reply that cannot be parsed degrades to a
//! fixed fallback, and every field is repaired independently so one bad
//! field never poisons the others.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use serde_json::Value;

use crate::mood::{MoodAnalysis, Sentiment};

const DEFAULT_MOOD_TAG: &str = "reflective";
const DEFAULT_STRESS_SCORE: u8 = 5;
pub const MAX_SUGGESTIONS: usize = 5;

/// Substituted when the reply is not parseable at all.
const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Take a few deep breaths",
    "Step outside for fresh air",
    "Talk to someone you trust",
];

/// Substituted when the suggestions field is missing, not a list, or empty.
const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Take a moment to breathe",
    "Stay hydrated",
    "Reach out to a friend",
];

/// Per-field intermediate: each field is repaired on its own, so a single
/// out-of-shape value (e.g. `"stressScore": "high"`) defaults that field
/// while the rest of the reply is kept.
struct RawReply {
    sentiment: Value,
    mood_tag: Value,
    stress_score: Value,
    suggestions: Value,
}

impl RawReply {
    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).cloned().unwrap_or(Value::Null);
        Self {
            sentiment: field("sentiment"),
            mood_tag: field("moodTag"),
            stress_score: field("stressScore"),
            suggestions: field("suggestions"),
        }
    }

    fn fallback() -> Self {
        Self {
            sentiment: Value::String("neutral".to_string()),
            mood_tag: Value::String(DEFAULT_MOOD_TAG.to_string()),
            stress_score: Value::from(DEFAULT_STRESS_SCORE),
            suggestions: Value::from(
                FALLBACK_SUGGESTIONS
                    .iter()
                    .map(|s| Value::from(*s))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

/// Normalize a raw model reply into a valid [`MoodAnalysis`].
///
/// The timestamp is stamped here, overriding anything in the reply.
pub fn normalize(reply: &str) -> MoodAnalysis {
    let payload = extract_payload(reply);
    let raw = match serde_json::from_str::<Value>(&payload) {
        Ok(value) => RawReply::from_value(&value),
        Err(err) => {
            tracing::warn!(error = %err, "model reply was not valid JSON, using fallback");
            RawReply::fallback()
        }
    };

    MoodAnalysis {
        sentiment: repair_sentiment(&raw.sentiment),
        mood_tag: repair_mood_tag(&raw.mood_tag),
        stress_score: repair_stress_score(&raw.stress_score),
        suggestions: repair_suggestions(&raw.suggestions),
        timestamp: Utc::now(),
        user_text: None,
    }
}

/// If the reply wraps its JSON in a fenced code block, take the fenced
/// contents; otherwise take the whole reply.
fn extract_payload(reply: &str) -> String {
    static FENCE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern must compile")
    });
    match FENCE.captures(reply) {
        Some(caps) => caps[1].trim().to_string(),
        None => reply.trim().to_string(),
    }
}

fn repair_sentiment(value: &Value) -> Sentiment {
    match value.as_str() {
        Some("positive") => Sentiment::Positive,
        Some("negative") => Sentiment::Negative,
        _ => Sentiment::Neutral,
    }
}

fn repair_mood_tag(value: &Value) -> String {
    match value.as_str() {
        Some(tag) => tag.to_lowercase(),
        None => DEFAULT_MOOD_TAG.to_string(),
    }
}

/// Numeric values are rounded to the nearest integer and clamped into
/// 0..=10; anything non-numeric defaults to the midpoint.
fn repair_stress_score(value: &Value) -> u8 {
    match value.as_f64() {
        Some(score) => score.round().clamp(0.0, 10.0) as u8,
        None => DEFAULT_STRESS_SCORE,
    }
}

fn repair_suggestions(value: &Value) -> Vec<String> {
    let coerced: Vec<String> = match value.as_array() {
        Some(items) => items
            .iter()
            .take(MAX_SUGGESTIONS)
            .map(|item| match item.as_str() {
                Some(text) => text.to_string(),
                None => item.to_string(),
            })
            .collect(),
        None => Vec::new(),
    };

    if coerced.is_empty() {
        DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        coerced
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MAX_SUGGESTIONS, normalize};
    use crate::mood::{MoodAnalysis, Sentiment};

    fn assert_invariants(analysis: &MoodAnalysis) {
        assert!(analysis.stress_score <= 10);
        assert!(!analysis.suggestions.is_empty());
        assert!(analysis.suggestions.len() <= MAX_SUGGESTIONS);
        assert_eq!(analysis.mood_tag, analysis.mood_tag.to_lowercase());
    }

    #[test]
    fn well_formed_reply_is_kept() {
        let reply = json!({
            "sentiment": "positive",
            "moodTag": "Hopeful",
            "stressScore": 3,
            "suggestions": ["Go for a walk", "Call a friend"]
        })
        .to_string();

        let analysis = normalize(&reply);
        assert_eq!(analysis.sentiment, Sentiment::Positive);
        assert_eq!(analysis.mood_tag, "hopeful");
        assert_eq!(analysis.stress_score, 3);
        assert_eq!(analysis.suggestions, vec!["Go for a walk", "Call a friend"]);
        assert_invariants(&analysis);
    }

    #[test]
    fn fenced_reply_parses_identically_to_unfenced() {
        let payload = r#"{"sentiment":"positive","moodTag":"calm","stressScore":2,"suggestions":["Rest"]}"#;
        let fenced = format!("```json\n{payload}\n```");

        let from_fenced = normalize(&fenced);
        let from_plain = normalize(payload);
        assert_eq!(from_fenced.sentiment, from_plain.sentiment);
        assert_eq!(from_fenced.mood_tag, from_plain.mood_tag);
        assert_eq!(from_fenced.stress_score, from_plain.stress_score);
        assert_eq!(from_fenced.suggestions, from_plain.suggestions);
    }

    #[test]
    fn bare_fence_without_language_tag_is_unwrapped() {
        let fenced = "```\n{\"sentiment\":\"negative\",\"moodTag\":\"tense\",\"stressScore\":8,\"suggestions\":[\"Pause\"]}\n```";
        let analysis = normalize(fenced);
        assert_eq!(analysis.sentiment, Sentiment::Negative);
        assert_eq!(analysis.stress_score, 8);
    }

    #[test]
    fn non_json_reply_degrades_to_the_fallback() {
        let analysis = normalize("I'm sorry, I can't help with that.");
        assert_eq!(analysis.sentiment, Sentiment::Neutral);
        assert_eq!(analysis.mood_tag, "reflective");
        assert_eq!(analysis.stress_score, 5);
        assert_eq!(analysis.suggestions.len(), 3);
        assert_invariants(&analysis);
    }

    #[test]
    fn stress_score_is_clamped_rounded_or_defaulted() {
        let cases = [
            (json!(-5), 0),
            (json!(3.6), 4),
            (json!(11), 10),
            (json!("high"), 5),
        ];
        for (score, expected) in cases {
            let reply = json!({ "stressScore": score }).to_string();
            assert_eq!(normalize(&reply).stress_score, expected, "reply {reply}");
        }
    }

    #[test]
    fn unknown_sentiment_defaults_to_neutral() {
        let reply = json!({ "sentiment": "ecstatic" }).to_string();
        assert_eq!(normalize(&reply).sentiment, Sentiment::Neutral);

        // enum matching is exact, not case-folded
        let reply = json!({ "sentiment": "POSITIVE" }).to_string();
        assert_eq!(normalize(&reply).sentiment, Sentiment::Neutral);
    }

    #[test]
    fn non_string_mood_tag_defaults() {
        let reply = json!({ "moodTag": 7 }).to_string();
        assert_eq!(normalize(&reply).mood_tag, "reflective");
    }

    #[test]
    fn suggestions_are_truncated_and_coerced_to_text() {
        let reply = json!({
            "suggestions": ["one", 2, "three", true, "five", "six", "seven"]
        })
        .to_string();

        let analysis = normalize(&reply);
        assert_eq!(analysis.suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(analysis.suggestions[1], "2");
        assert_eq!(analysis.suggestions[3], "true");
    }

    #[test]
    fn missing_or_empty_suggestions_get_the_default_set() {
        for reply in [
            json!({ "suggestions": "take a break" }).to_string(),
            json!({ "suggestions": [] }).to_string(),
            json!({}).to_string(),
        ] {
            let analysis = normalize(&reply);
            assert_eq!(analysis.suggestions.len(), 3);
            assert_invariants(&analysis);
        }
    }

    #[test]
    fn timestamp_is_stamped_at_normalization_time() {
        let before = chrono::Utc::now();
        let reply = json!({ "timestamp": "1999-01-01T00:00:00Z" }).to_string();
        let analysis = normalize(&reply);
        assert!(analysis.timestamp >= before);
    }
}
