use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::traits::{AnimeSummary, AnimeTrendsService};
use crate::types::{ErrorBody, RecommendationsResponse, TopAnimeItem};

/// Default service location when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const TOP_ANIME_PATH: &[&str] = &["api", "top-anime"];
const RECOMMENDATIONS_PATH: &[&str] = &["api", "recommendations"];

/// HTTP client for the AnimeTrends REST service.
#[derive(Debug, Clone)]
pub struct AnimeTrendsClient {
    base_url: Url,
    http: Client,
}

impl AnimeTrendsClient {
    /// Create a client for the service at `base_url`, without a request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client whose requests give up after `timeout`, if set.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url,
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the top-anime listing.
    pub fn top_anime_url(&self) -> Result<Url, ApiError> {
        self.endpoint(TOP_ANIME_PATH.iter().copied())
    }

    /// URL of the recommendations for `title`, which becomes a single
    /// percent-encoded path segment.
    ///
    /// Empty titles and the dot segments `.` and `..` are rejected: URL
    /// normalization would drop them (even as `%2E`) and the request would
    /// reach a different route.
    pub fn recommendations_url(&self, title: &str) -> Result<Url, ApiError> {
        if matches!(title, "" | "." | "..") {
            return Err(ApiError::InvalidTitle(title.to_string()));
        }
        let mut segments: Vec<&str> = RECOMMENDATIONS_PATH.to_vec();
        segments.push(title);
        self.endpoint(segments)
    }

    /// Resolve an image or other asset reference. Absolute URLs pass through,
    /// relative ones are taken against the service base URL.
    pub fn asset_url(&self, raw: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(raw.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Check the HTTP response for errors, surfacing the service's error text.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "AnimeTrends API error");
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.trim().to_string());
            Err(ApiError::Api { status, message })
        }
    }
}

impl AnimeTrendsService for AnimeTrendsClient {
    type Error = ApiError;

    async fn top_anime(&self) -> Result<Vec<AnimeSummary>, ApiError> {
        let url = self.top_anime_url()?;
        tracing::debug!(%url, "Fetching top anime");

        let resp = self.http.get(url).send().await?;
        tracing::debug!(status = resp.status().as_u16(), "Top anime response received");

        let resp = Self::check_response(resp).await?;
        let items: Vec<TopAnimeItem> = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(items.into_iter().map(TopAnimeItem::into_summary).collect())
    }

    async fn recommendations(&self, title: &str) -> Result<Vec<String>, ApiError> {
        let url = self.recommendations_url(title)?;
        tracing::debug!(%url, title, "Fetching recommendations");

        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body: RecommendationsResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(body.recommendations)
    }
}

/// Parse and sanity-check a configured base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(format!(
            "{raw}: expected an http(s) base URL"
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> AnimeTrendsClient {
        AnimeTrendsClient::new(DEFAULT_BASE_URL).unwrap()
    }

    #[test]
    fn test_top_anime_url() {
        assert_eq!(
            client().top_anime_url().unwrap().as_str(),
            "http://localhost:8000/api/top-anime"
        );
    }

    #[test]
    fn test_base_url_with_prefix_and_trailing_slash() {
        let client = AnimeTrendsClient::new("https://example.org/anime/").unwrap();
        assert_eq!(
            client.top_anime_url().unwrap().as_str(),
            "https://example.org/anime/api/top-anime"
        );
    }

    #[test]
    fn test_recommendations_url_plain_title() {
        assert_eq!(
            client().recommendations_url("Naruto").unwrap().as_str(),
            "http://localhost:8000/api/recommendations/Naruto"
        );
    }

    #[test]
    fn test_recommendations_url_encodes_reserved_characters() {
        let url = client()
            .recommendations_url("Fate/Zero: Part 2? #1 100%")
            .unwrap();
        assert_eq!(
            url.path(),
            "/api/recommendations/Fate%2FZero:%20Part%202%3F%20%231%20100%25"
        );
        // The title stays a single segment.
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn test_recommendations_url_rejects_dot_segments() {
        for title in ["", ".", ".."] {
            assert!(
                matches!(
                    client().recommendations_url(title),
                    Err(ApiError::InvalidTitle(t)) if t == title
                ),
                "title {title:?}"
            );
        }
        // Longer runs of dots are ordinary segments.
        assert_eq!(
            client().recommendations_url("...").unwrap().path(),
            "/api/recommendations/..."
        );
    }

    #[test]
    fn test_recommendations_url_encodes_non_ascii() {
        let url = client().recommendations_url("葬送のフリーレン").unwrap();
        assert!(url.path().starts_with("/api/recommendations/%E8%91%AC"));
    }

    #[test]
    fn test_asset_url_resolution() {
        let client = client();
        assert_eq!(
            client.asset_url("x.jpg").unwrap().as_str(),
            "http://localhost:8000/x.jpg"
        );
        assert_eq!(
            client
                .asset_url("https://cdn.myanimelist.net/images/anime/13/17405.jpg")
                .unwrap()
                .as_str(),
            "https://cdn.myanimelist.net/images/anime/13/17405.jpg"
        );
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(matches!(
            AnimeTrendsClient::new("mailto:someone@example.org"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            AnimeTrendsClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
