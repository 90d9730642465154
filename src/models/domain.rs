use serde::{Deserialize, Serialize};

/// Candidate event supplied by the caller
///
/// Optional text fields default to an empty value when absent. An explicit
/// `null` is kept as `None` so it is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default = "empty_text")]
    pub description: Option<String>,
    #[serde(default = "empty_text")]
    pub venue: Option<String>,
    #[serde(default = "empty_tags")]
    pub tags: Option<Vec<String>>,
    pub date: String,
    #[serde(default = "empty_text")]
    pub category: Option<String>,
}

impl Event {
    /// Helper to get the description, treating `null` as empty
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Helper to get the venue, treating `null` as empty
    pub fn venue(&self) -> &str {
        self.venue.as_deref().unwrap_or("")
    }

    /// Helper to get the tags, treating `null` as empty
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Helper to get the category, treating `null` as empty
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

fn empty_text() -> Option<String> {
    Some(String::new())
}

fn empty_tags() -> Option<Vec<String>> {
    Some(Vec::new())
}

/// Breakdown of the score computed for one event
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub tag: f64,
    pub text: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.tag + self.text + self.recency
    }
}

/// Scoring weights
///
/// Defaults reproduce the reference ranking: +3 per matched interest,
/// +3/+2/+1 for a query hit in title/description/venue, and a recency bonus
/// of 0.6 per day inside a five day window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub tag_match: f64,
    pub title_match: f64,
    pub description_match: f64,
    pub venue_match: f64,
    pub recency_per_day: f64,
    pub recency_window_days: i64,
    pub recency_horizon_days: i64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            tag_match: 3.0,
            title_match: 3.0,
            description_match: 2.0,
            venue_match: 1.0,
            recency_per_day: 0.6,
            recency_window_days: 5,
            recency_horizon_days: 10,
        }
    }
}
