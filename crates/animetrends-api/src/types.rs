use serde::Deserialize;

use crate::traits::{AnimeId, AnimeSummary};

// ── Top anime response ──────────────────────────────────────────

/// One entry of the `/api/top-anime` array.
///
/// Only `mal_id` and `title` are required. The service builds these rows
/// from a dataframe, so integer columns with gaps may arrive as floats.
#[derive(Debug, Deserialize)]
pub struct TopAnimeItem {
    pub mal_id: AnimeId,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub episodes: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub year: Option<f64>,
    #[serde(default)]
    pub studios: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
}

impl TopAnimeItem {
    pub fn into_summary(self) -> AnimeSummary {
        AnimeSummary {
            id: self.mal_id,
            title: self.title,
            image_url: self.image_url.filter(|u| !u.is_empty()),
            score: self.score,
            genres: self.genres.unwrap_or_default(),
            title_english: self.title_english.filter(|t| !t.is_empty()),
            episodes: self.episodes.and_then(whole_number),
            status: self.status,
            synopsis: self.synopsis,
            year: self.year.and_then(whole_number),
            studios: self.studios.filter(|s| !s.is_empty()),
        }
    }
}

fn whole_number(v: f64) -> Option<u32> {
    if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

// ── Recommendations response ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
}

// ── Error body ──────────────────────────────────────────────────

/// Body the service sends alongside a failing status.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_top_anime_minimal() {
        let json = r#"[
            {"mal_id": 1, "title": "Naruto", "score": 8.1, "genres": "Action, Adventure", "image_url": "x.jpg"}
        ]"#;

        let items: Vec<TopAnimeItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);

        let anime = items.into_iter().next().unwrap().into_summary();
        assert_eq!(anime.id, AnimeId::Number(1));
        assert_eq!(anime.title, "Naruto");
        assert_eq!(anime.score, Some(8.1));
        assert_eq!(anime.genres, "Action, Adventure");
        assert_eq!(anime.image_url.as_deref(), Some("x.jpg"));
        assert!(anime.episodes.is_none());
    }

    #[test]
    fn test_deserialize_top_anime_full_row() {
        let json = r#"{
            "mal_id": 52991,
            "title": "Sousou no Frieren",
            "title_english": "Frieren: Beyond Journey's End",
            "genres": "Adventure, Drama, Fantasy",
            "score": 9.3,
            "popularity": 142,
            "episodes": 28.0,
            "status": "Finished Airing",
            "synopsis": "During their decade-long quest...",
            "year": 2023.0,
            "studios": "Madhouse",
            "source": "Manga",
            "duration": "24 min per ep",
            "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg"
        }"#;

        let anime = serde_json::from_str::<TopAnimeItem>(json)
            .unwrap()
            .into_summary();
        assert_eq!(anime.episodes, Some(28));
        assert_eq!(anime.year, Some(2023));
        assert_eq!(anime.studios.as_deref(), Some("Madhouse"));
        assert_eq!(
            anime.title_english.as_deref(),
            Some("Frieren: Beyond Journey's End")
        );
    }

    #[test]
    fn test_null_columns_become_absent() {
        let json = r#"{
            "mal_id": 5114,
            "title": "Fullmetal Alchemist: Brotherhood",
            "score": null,
            "genres": null,
            "image_url": null,
            "episodes": null,
            "year": null
        }"#;

        let anime = serde_json::from_str::<TopAnimeItem>(json)
            .unwrap()
            .into_summary();
        assert!(anime.score.is_none());
        assert!(anime.image_url.is_none());
        assert_eq!(anime.genres, "");
        assert!(anime.year.is_none());
    }

    #[test]
    fn test_string_id_is_kept_opaque() {
        let json = r#"{"mal_id": "abc-1", "title": "Monster"}"#;
        let anime = serde_json::from_str::<TopAnimeItem>(json)
            .unwrap()
            .into_summary();
        assert_eq!(anime.id, AnimeId::Text("abc-1".into()));
        assert_eq!(anime.id.to_string(), "abc-1");
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let json = r#"{"mal_id": 1, "score": 8.0}"#;
        assert!(serde_json::from_str::<TopAnimeItem>(json).is_err());
    }

    #[test]
    fn test_deserialize_recommendations() {
        let json = r#"{"recommendations": ["Bleach", "One Piece"]}"#;
        let resp: RecommendationsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.recommendations, vec!["Bleach", "One Piece"]);
    }

    #[test]
    fn test_recommendations_without_field_is_rejected() {
        let json = r#"{"error": "Anime not found"}"#;
        assert!(serde_json::from_str::<RecommendationsResponse>(json).is_err());
        let body: ErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.error, "Anime not found");
    }
}
