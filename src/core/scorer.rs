use chrono::{Local, NaiveDateTime};

use crate::core::scoring::{calculate_event_score, UserSignals};
use crate::models::{Event, RecommendRequest, ScoringWeights};

/// Category value that disables category filtering
const ALL_CATEGORIES: &str = "all";

/// Result of ranking a request
#[derive(Debug)]
pub struct Recommendation {
    pub events: Vec<Event>,
    pub total_candidates: usize,
}

/// Ranks candidate events for a request
///
/// # Pipeline Stages
/// 1. Optional category filter
/// 2. Tag, text and recency scoring
/// 3. Stable sort by descending score
/// 4. Truncation to the requested limit
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank the request's events against the local wall clock
    pub fn recommend(&self, request: RecommendRequest) -> Recommendation {
        self.recommend_at(request, Local::now().naive_local())
    }

    /// Rank the request's events as of `now`
    ///
    /// # Arguments
    /// * `request` - Interests, query, limit and the candidate pool
    /// * `now` - Reference time for the recency bonus
    ///
    /// # Returns
    /// Recommendation holding at most `limit` events, best first. Events with
    /// equal scores keep their input order.
    pub fn recommend_at(&self, request: RecommendRequest, now: NaiveDateTime) -> Recommendation {
        let RecommendRequest {
            interests,
            query,
            limit,
            events,
            category,
        } = request;

        let limit = usize::try_from(limit).unwrap_or(0);
        let signals = UserSignals::new(&interests, &query);
        let category = category
            .map(|c| c.to_lowercase())
            .filter(|c| c != ALL_CATEGORIES);

        let mut scored: Vec<(Event, f64)> = events
            .into_iter()
            // Stage 1: Category filter
            .filter(|event| match &category {
                Some(wanted) => event.category().to_lowercase() == *wanted,
                None => true,
            })
            // Stage 2: Scoring
            .map(|event| {
                let score = calculate_event_score(&event, &signals, &self.weights, now).total();
                (event, score)
            })
            .collect();

        let total_candidates = scored.len();

        // Stage 3: `sort_by` is stable, ties keep input order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Stage 4: Limit results
        scored.truncate(limit);

        Recommendation {
            events: scored.into_iter().map(|(event, _)| event).collect(),
            total_candidates,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
