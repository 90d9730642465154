// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Event, ScoreBreakdown, ScoringWeights};
pub use requests::RecommendRequest;
pub use responses::{ErrorResponse, HealthResponse};
