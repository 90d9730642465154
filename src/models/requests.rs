use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Event;

/// Request to rank a pool of events
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[validate(length(max = 10000))]
    pub events: Vec<Event>,
    /// Restrict candidates to one category; "All" disables the filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

pub fn default_limit() -> i64 {
    9
}
