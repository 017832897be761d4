use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Overall sentiment of a check-in. Always one of these three — free-text
/// labels from the model are normalized before they ever reach this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

/// The result of one check-in. Produced exactly once by the response
/// normalizer and immutable afterwards: every consumer may rely on the
/// invariants (stress_score in 0..=10, 1–5 suggestions) without re-checking.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysis {
    /// Overall sentiment label
    pub sentiment: Sentiment,
    /// One-word (or short phrase) emotional state, lowercased
    pub mood_tag: String,
    /// Stress intensity, always an integer in 0..=10
    pub stress_score: u8,
    /// 1–5 short actionable suggestions
    pub suggestions: Vec<String>,
    /// When the analysis was produced (stamped at normalization time,
    /// not client time)
    pub timestamp: DateTime<Utc>,
    /// The text the user submitted, attached by the caller for display only.
    /// Not part of the analysis contract and never revalidated.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_text: Option<String>,
}

/// The persisted history log: newest first, capped at
/// [`crate::history::MAX_ENTRIES`]. This struct is the on-disk JSON shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MoodHistory {
    #[serde(default)]
    pub entries: Vec<MoodAnalysis>,
}
