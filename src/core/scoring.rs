use chrono::NaiveDateTime;

use crate::core::dates::days_until;
use crate::models::{Event, ScoreBreakdown, ScoringWeights};

/// Lower-cased view of the user's side of a request
///
/// Built once per request so every event is compared against the same
/// normalized interests and query.
#[derive(Debug, Clone)]
pub struct UserSignals {
    interests: Vec<String>,
    query: String,
}

impl UserSignals {
    pub fn new(interests: &[String], query: &str) -> Self {
        Self {
            interests: interests.iter().map(|t| t.to_lowercase()).collect(),
            query: query.to_lowercase(),
        }
    }
}

/// Calculate the score of an event for a user
///
/// Scoring formula:
/// score = (
///     tag_match * matched_interests +   # exact, case-insensitive tag hits
///     title/description/venue hits +    # substring match of the query
///     recency_bonus                     # sooner events score higher
/// )
pub fn calculate_event_score(
    event: &Event,
    signals: &UserSignals,
    weights: &ScoringWeights,
    now: NaiveDateTime,
) -> ScoreBreakdown {
    let days = days_until(&event.date, now);

    ScoreBreakdown {
        tag: calculate_tag_score(event.tags(), &signals.interests, weights),
        text: calculate_text_score(event, &signals.query, weights),
        recency: calculate_recency_bonus(days, weights),
    }
}

/// Tag score: one `tag_match` per interest found among the event tags
///
/// Interests are counted as given, so a repeated interest scores twice.
#[inline]
fn calculate_tag_score(tags: &[String], interests: &[String], weights: &ScoringWeights) -> f64 {
    if interests.is_empty() || tags.is_empty() {
        return 0.0;
    }

    let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let hits = interests.iter().filter(|i| tags.contains(i)).count();

    hits as f64 * weights.tag_match
}

/// Text score: independent substring checks of the query against
/// title, description and venue
#[inline]
fn calculate_text_score(event: &Event, query: &str, weights: &ScoringWeights) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    if event.title.to_lowercase().contains(query) {
        score += weights.title_match;
    }
    if event.description().to_lowercase().contains(query) {
        score += weights.description_match;
    }
    if event.venue().to_lowercase().contains(query) {
        score += weights.venue_match;
    }

    score
}

/// Recency bonus: `max(0, window - min(days, horizon)) * per_day`
///
/// Past events have negative `days` and so earn more than the same-day bonus.
#[inline]
pub fn calculate_recency_bonus(days: i64, weights: &ScoringWeights) -> f64 {
    let remaining = weights.recency_window_days - days.min(weights.recency_horizon_days);
    remaining.max(0) as f64 * weights.recency_per_day
}
