//! State of the single AnimeTrends view.
//!
//! The top-anime catalog is `Loading`, `Failed` or `Loaded`, never a mix.
//! Recommendations form an independent sub-state that only exists once the
//! catalog is loaded. Every recommendation request carries a `Ticket`; only
//! the response to the newest ticket is applied.

use animetrends_api::AnimeSummary;

/// Lifecycle of the top-anime listing.
#[derive(Debug, Clone, Default)]
pub enum Catalog {
    #[default]
    Loading,
    Failed(String),
    Loaded(Vec<AnimeSummary>),
}

/// Monotonic tag of a recommendation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A recommendation fetch the caller should now perform.
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub ticket: Ticket,
    pub title: String,
}

/// What happened to a recommendation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationOutcome {
    /// The list was replaced; carries the new length.
    Applied(usize),
    /// A newer selection superseded this response; it was dropped.
    Stale,
    /// The fetch failed; the displayed list is unchanged.
    Failed(String),
}

/// Recommendations shown below the grid.
#[derive(Debug, Clone, Default)]
pub struct Recommendations {
    source: Option<AnimeSummary>,
    titles: Vec<String>,
    pending: Option<(Ticket, AnimeSummary)>,
}

impl Recommendations {
    /// The anime the current list was fetched for.
    pub fn source(&self) -> Option<&AnimeSummary> {
        self.source.as_ref()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Title of the selection still waiting for its response.
    pub fn pending_title(&self) -> Option<&str> {
        self.pending.as_ref().map(|(_, a)| a.title.as_str())
    }

    /// Ticket of the request still in flight, if any.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|(t, _)| *t)
    }

    /// The most recently selected anime: the pending one, else the source.
    pub fn selected(&self) -> Option<&AnimeSummary> {
        self.pending
            .as_ref()
            .map(|(_, a)| a)
            .or(self.source.as_ref())
    }
}

/// What the view should draw, derived purely from `ViewState`.
#[derive(Debug)]
pub enum Screen<'a> {
    Loading,
    Error(&'a str),
    Grid {
        anime: &'a [AnimeSummary],
        /// Present only when there is at least one recommendation.
        recommendations: Option<&'a Recommendations>,
    },
}

/// All state owned by the view controller.
#[derive(Debug, Default)]
pub struct ViewState {
    catalog: Catalog,
    recommendations: Recommendations,
    last_ticket: u64,
}

impl ViewState {
    /// A fresh view, waiting for the initial load.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recommendations(&self) -> &Recommendations {
        &self.recommendations
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.catalog, Catalog::Loading)
    }

    /// Settle the initial load. Only the first result is accepted.
    ///
    /// Returns `false` when the catalog had already settled.
    pub fn finish_initial_load(&mut self, result: Result<Vec<AnimeSummary>, String>) -> bool {
        if !self.is_loading() {
            tracing::warn!("Ignoring repeated top anime result");
            return false;
        }
        self.catalog = match result {
            Ok(anime) => {
                tracing::info!(count = anime.len(), "Top anime loaded");
                Catalog::Loaded(anime)
            }
            Err(reason) => {
                tracing::error!(%reason, "Top anime fetch failed");
                Catalog::Failed(format!("Failed to fetch anime: {reason}"))
            }
        };
        true
    }

    /// Register a selection and hand out the request to perform.
    ///
    /// Returns `None` unless the catalog is loaded.
    pub fn select(&mut self, anime: &AnimeSummary) -> Option<RecommendationRequest> {
        if !matches!(self.catalog, Catalog::Loaded(_)) {
            return None;
        }
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.recommendations.pending = Some((ticket, anime.clone()));
        tracing::debug!(ticket = ticket.get(), title = %anime.title, "Anime selected");
        Some(RecommendationRequest {
            ticket,
            title: anime.title.clone(),
        })
    }

    /// Apply a recommendation response if it answers the newest selection.
    pub fn apply_recommendations(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<String>, String>,
    ) -> RecommendationOutcome {
        let is_current = matches!(&self.recommendations.pending, Some((t, _)) if *t == ticket);
        if !is_current {
            tracing::debug!(ticket = ticket.get(), "Dropping stale recommendations");
            return RecommendationOutcome::Stale;
        }
        let Some((_, anime)) = self.recommendations.pending.take() else {
            return RecommendationOutcome::Stale;
        };

        match result {
            Ok(titles) => {
                let count = titles.len();
                self.recommendations.titles = titles;
                self.recommendations.source = Some(anime);
                RecommendationOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!(title = %anime.title, "Error fetching recommendations: {e}");
                RecommendationOutcome::Failed(e)
            }
        }
    }

    /// Decide what to render.
    pub fn screen(&self) -> Screen<'_> {
        match &self.catalog {
            Catalog::Loading => Screen::Loading,
            Catalog::Failed(message) => Screen::Error(message),
            Catalog::Loaded(anime) => Screen::Grid {
                anime,
                recommendations: (!self.recommendations.titles.is_empty())
                    .then_some(&self.recommendations),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use animetrends_api::AnimeId;

    use super::*;

    fn anime(id: u64, title: &str) -> AnimeSummary {
        AnimeSummary {
            id: AnimeId::Number(id),
            title: title.into(),
            image_url: None,
            score: Some(8.1),
            genres: "Action, Adventure".into(),
            title_english: None,
            episodes: None,
            status: None,
            synopsis: None,
            year: None,
            studios: None,
        }
    }

    fn loaded(titles: &[&str]) -> ViewState {
        let mut state = ViewState::new();
        let list = titles
            .iter()
            .enumerate()
            .map(|(i, t)| anime(i as u64 + 1, t))
            .collect();
        assert!(state.finish_initial_load(Ok(list)));
        state
    }

    fn grid_titles(state: &ViewState) -> Vec<String> {
        match state.screen() {
            Screen::Grid { anime, .. } => anime.iter().map(|a| a.title.clone()).collect(),
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_loading() {
        let state = ViewState::new();
        assert!(state.is_loading());
        assert!(matches!(state.screen(), Screen::Loading));
    }

    #[test]
    fn test_loaded_grid_keeps_response_order() {
        let state = loaded(&["Naruto", "Bleach", "One Piece"]);
        assert_eq!(grid_titles(&state), ["Naruto", "Bleach", "One Piece"]);
        match state.screen() {
            Screen::Grid {
                recommendations, ..
            } => assert!(recommendations.is_none()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_listing_is_an_empty_grid() {
        let state = loaded(&[]);
        assert!(grid_titles(&state).is_empty());
    }

    #[test]
    fn test_failure_renders_only_error() {
        let mut state = ViewState::new();
        assert!(state.finish_initial_load(Err("HTTP error! status: 500".into())));
        match state.screen() {
            Screen::Error(msg) => {
                assert_eq!(msg, "Failed to fetch anime: HTTP error! status: 500")
            }
            other => panic!("expected error, got {other:?}"),
        }
        assert!(!state.is_loading());
    }

    #[test]
    fn test_initial_load_settles_once() {
        let mut state = ViewState::new();
        assert!(state.finish_initial_load(Err("connection refused".into())));
        assert!(!state.finish_initial_load(Ok(vec![anime(1, "Naruto")])));
        assert!(matches!(state.screen(), Screen::Error(_)));
    }

    #[test]
    fn test_select_requires_loaded_catalog() {
        let mut state = ViewState::new();
        assert!(state.select(&anime(1, "Naruto")).is_none());

        state.finish_initial_load(Err("timeout".into()));
        assert!(state.select(&anime(1, "Naruto")).is_none());
    }

    #[test]
    fn test_select_then_apply_shows_panel() {
        let mut state = loaded(&["Naruto"]);
        let naruto = anime(1, "Naruto");
        let req = state.select(&naruto).unwrap();
        assert_eq!(req.title, "Naruto");
        assert_eq!(state.recommendations().pending_title(), Some("Naruto"));
        assert_eq!(state.recommendations().selected().unwrap().title, "Naruto");

        let outcome =
            state.apply_recommendations(req.ticket, Ok(vec!["Bleach".into(), "One Piece".into()]));
        assert_eq!(outcome, RecommendationOutcome::Applied(2));

        match state.screen() {
            Screen::Grid {
                recommendations: Some(recs),
                ..
            } => {
                assert_eq!(recs.titles(), ["Bleach", "One Piece"]);
                assert_eq!(recs.source().unwrap().title, "Naruto");
                assert!(recs.pending_title().is_none());
            }
            other => panic!("expected grid with recommendations, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_recommendations_hide_panel() {
        let mut state = loaded(&["Naruto"]);
        let req = state.select(&anime(1, "Naruto")).unwrap();
        state.apply_recommendations(req.ticket, Ok(vec![]));
        match state.screen() {
            Screen::Grid {
                recommendations, ..
            } => assert!(recommendations.is_none()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_failure_keeps_previous_recommendations() {
        let mut state = loaded(&["Naruto", "Monster"]);
        let first = state.select(&anime(1, "Naruto")).unwrap();
        state.apply_recommendations(first.ticket, Ok(vec!["Bleach".into()]));

        let second = state.select(&anime(2, "Monster")).unwrap();
        let outcome = state.apply_recommendations(second.ticket, Err("HTTP error".into()));
        assert_eq!(outcome, RecommendationOutcome::Failed("HTTP error".into()));

        assert_eq!(state.recommendations().titles(), ["Bleach"]);
        assert_eq!(state.recommendations().source().unwrap().title, "Naruto");
        assert_eq!(state.recommendations().selected().unwrap().title, "Naruto");
        assert!(matches!(state.screen(), Screen::Grid { .. }));
    }

    #[test]
    fn test_late_response_for_older_selection_is_dropped() {
        let mut state = loaded(&["Naruto", "Monster"]);
        let a = state.select(&anime(1, "Naruto")).unwrap();
        let b = state.select(&anime(2, "Monster")).unwrap();
        assert!(b.ticket > a.ticket);

        // B answers first, then A arrives late.
        assert_eq!(
            state.apply_recommendations(b.ticket, Ok(vec!["Pluto".into()])),
            RecommendationOutcome::Applied(1)
        );
        assert_eq!(
            state.apply_recommendations(a.ticket, Ok(vec!["Bleach".into()])),
            RecommendationOutcome::Stale
        );
        assert_eq!(state.recommendations().titles(), ["Pluto"]);
        assert_eq!(state.recommendations().source().unwrap().title, "Monster");
    }

    #[test]
    fn test_early_response_for_older_selection_is_dropped() {
        let mut state = loaded(&["Naruto", "Monster"]);
        let a = state.select(&anime(1, "Naruto")).unwrap();
        let b = state.select(&anime(2, "Monster")).unwrap();

        assert_eq!(
            state.apply_recommendations(a.ticket, Ok(vec!["Bleach".into()])),
            RecommendationOutcome::Stale
        );
        assert!(state.recommendations().titles().is_empty());
        assert_eq!(state.recommendations().pending_title(), Some("Monster"));

        state.apply_recommendations(b.ticket, Ok(vec!["Pluto".into()]));
        assert_eq!(state.recommendations().titles(), ["Pluto"]);
    }

    #[test]
    fn test_same_ticket_applies_once() {
        let mut state = loaded(&["Naruto"]);
        let req = state.select(&anime(1, "Naruto")).unwrap();
        state.apply_recommendations(req.ticket, Ok(vec!["Bleach".into()]));
        assert_eq!(
            state.apply_recommendations(req.ticket, Ok(vec!["Other".into()])),
            RecommendationOutcome::Stale
        );
        assert_eq!(state.recommendations().titles(), ["Bleach"]);
    }

    #[test]
    fn test_reselecting_never_revisits_loading() {
        let mut state = loaded(&["Naruto"]);
        for _ in 0..3 {
            let req = state.select(&anime(1, "Naruto")).unwrap();
            assert!(!state.is_loading());
            state.apply_recommendations(req.ticket, Err("offline".into()));
            assert!(matches!(state.screen(), Screen::Grid { .. }));
        }
    }
}
