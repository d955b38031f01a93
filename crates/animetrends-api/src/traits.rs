//! Service-agnostic types and the trait the client implements.
//!
//! The UI only talks to `AnimeTrendsService`, so tests and alternative
//! backends can stand in for the HTTP client.

use std::future::Future;

/// Interface of the anime ranking and recommendation service.
pub trait AnimeTrendsService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the list of top-ranked anime, in service order.
    fn top_anime(&self) -> impl Future<Output = Result<Vec<AnimeSummary>, Self::Error>> + Send;

    /// Fetch recommended titles for the given anime title.
    fn recommendations(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}

/// Opaque identifier of an anime as delivered by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AnimeId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for AnimeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A top-ranked anime as displayed on a card.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnimeSummary {
    pub id: AnimeId,
    pub title: String,
    pub image_url: Option<String>,
    pub score: Option<f64>,
    /// Comma-joined genre names, shown as delivered.
    pub genres: String,
    pub title_english: Option<String>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub synopsis: Option<String>,
    pub year: Option<u32>,
    pub studios: Option<String>,
}
