//! Client for the AnimeTrends ranking and recommendation service.

pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{AnimeTrendsClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use traits::{AnimeId, AnimeSummary, AnimeTrendsService};
