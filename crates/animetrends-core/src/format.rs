//! Display formatting helpers for anime metadata values.

use animetrends_api::AnimeSummary;

/// Shown where the service left a value out.
const MISSING: &str = "N/A";

pub fn score(score: Option<f64>) -> String {
    match score {
        Some(s) if s.is_finite() => format!("Score: {s}"),
        _ => format!("Score: {MISSING}"),
    }
}

/// Genres exactly as the service joined them.
pub fn genres(genres: &str) -> String {
    let genres = genres.trim();
    if genres.is_empty() {
        format!("Genres: {MISSING}")
    } else {
        format!("Genres: {genres}")
    }
}

/// One-line summary of the optional details, e.g. `28 eps · 2023 · Madhouse`.
pub fn details(anime: &AnimeSummary) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(eps) = anime.episodes {
        parts.push(if eps == 1 {
            "1 ep".to_string()
        } else {
            format!("{eps} eps")
        });
    }
    if let Some(year) = anime.year {
        parts.push(year.to_string());
    }
    if let Some(status) = anime.status.as_deref().filter(|s| !s.is_empty()) {
        parts.push(status.to_string());
    }
    if let Some(studios) = anime.studios.as_deref() {
        parts.push(studios.to_string());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("  \u{00B7}  "))
    }
}

/// Longest synopsis excerpt shown under the recommendations heading.
const SYNOPSIS_MAX_CHARS: usize = 280;

/// Synopsis cut to a readable excerpt at a word boundary.
pub fn synopsis(anime: &AnimeSummary) -> Option<String> {
    let text = anime.synopsis.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= SYNOPSIS_MAX_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(SYNOPSIS_MAX_CHARS).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(end) => &cut[..end],
        None => cut.as_str(),
    };
    Some(format!("{}\u{2026}", cut.trim_end_matches([',', '.', ';', ':', ' '])))
}

/// Heading of the recommendations panel.
pub fn recommendations_heading(source: Option<&AnimeSummary>) -> String {
    match source {
        Some(anime) => match anime.title_english.as_deref() {
            Some(en) if en != anime.title => {
                format!("Recommended for {} ({en})", anime.title)
            }
            _ => format!("Recommended for {}", anime.title),
        },
        None => "Recommended Anime".into(),
    }
}
