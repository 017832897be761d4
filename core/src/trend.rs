//! Derives the 7-day stress trend from the history log.
//!
//! Buckets are civil calendar days in local time, not rolling 24-hour
//! windows: two entries submitted on the same local day always land in the
//! same bucket even if less than 24 hours apart.

use std::collections::HashMap;

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::mood::MoodAnalysis;

pub const TREND_DAYS: u64 = 7;

/// One calendar day of the trend, derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    /// Display label, e.g. "Mon, Jan 5"
    pub date: String,
    /// Weekday abbreviation, e.g. "Mon"
    pub short_date: String,
    /// Average stress score for the day (mean, rounded), null when the day
    /// has no entries
    pub stress_score: Option<u8>,
    pub has_data: bool,
}

/// Buckets for the 7 calendar days ending today, oldest first.
pub fn last_7_days(entries: &[MoodAnalysis], today: NaiveDate) -> Vec<TrendBucket> {
    let mut scores_by_day: HashMap<NaiveDate, Vec<u8>> = HashMap::new();
    for entry in entries {
        let day = entry.timestamp.with_timezone(&Local).date_naive();
        scores_by_day.entry(day).or_default().push(entry.stress_score);
    }

    (0..TREND_DAYS)
        .rev()
        .map(|offset| {
            let day = today - Days::new(offset);
            let average = scores_by_day.get(&day).map(|scores| {
                let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
                (f64::from(sum) / scores.len() as f64).round() as u8
            });
            TrendBucket {
                date: day.format("%a, %b %-d").to_string(),
                short_date: day.format("%a").to_string(),
                stress_score: average,
                has_data: average.is_some(),
            }
        })
        .collect()
}
