use std::collections::HashMap;

use animetrends_api::AnimeId;
use iced::widget::image;

/// State of a cover image for a given anime.
#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Loaded(image::Handle),
    Failed,
}

/// In-memory cache mapping anime IDs to their cover image state.
#[derive(Debug, Default)]
pub struct CoverCache {
    states: HashMap<AnimeId, CoverState>,
}

impl CoverCache {
    pub fn get(&self, id: &AnimeId) -> Option<&CoverState> {
        self.states.get(id)
    }

    /// Mark `id` as loading. Returns `false` if it was already requested.
    pub fn begin(&mut self, id: &AnimeId) -> bool {
        if self.states.contains_key(id) {
            return false;
        }
        self.states.insert(id.clone(), CoverState::Loading);
        true
    }

    pub fn finish(&mut self, id: AnimeId, result: Result<image::Handle, String>) {
        let state = match result {
            Ok(handle) => CoverState::Loaded(handle),
            Err(_) => CoverState::Failed,
        };
        self.states.insert(id, state);
    }

    /// Record that an anime has no usable cover.
    pub fn mark_failed(&mut self, id: &AnimeId) {
        self.states.entry(id.clone()).or_insert(CoverState::Failed);
    }
}

/// Download a cover image into memory.
pub async fn fetch_cover(url: String) -> Result<image::Handle, String> {
    let bytes = reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    Ok(image::Handle::from_bytes(bytes))
}
