// Core algorithm exports
pub mod dates;
pub mod scorer;
pub mod scoring;

pub use dates::{days_until, parse_event_date, DateParseError, UNPARSEABLE_DAYS};
pub use scorer::{Recommendation, Scorer};
pub use scoring::{calculate_event_score, calculate_recency_bonus, UserSignals};
