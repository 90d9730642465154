//! Event Recommender - stateless ranking service for upcoming events
//!
//! This library ranks a caller-supplied pool of events against a user's
//! interest tags and free-text query, adding a bonus for events happening
//! soon, and returns the best matches in order.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use core::{days_until, parse_event_date, Recommendation, Scorer};
pub use models::{Event, RecommendRequest, ScoringWeights};
