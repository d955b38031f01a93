use iced::widget::{column, container, image, row, text, Space};
use iced::window;
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use iced_aw::Wrap;

use animetrends_api::{AnimeId, AnimeSummary, AnimeTrendsClient, AnimeTrendsService};
use animetrends_core::config::{AppConfig, ThemeMode};
use animetrends_core::debug_log::{EventLog, FetchEvent};
use animetrends_core::view::{RecommendationOutcome, Screen, Ticket, ViewState};

use crate::cover_cache::{self, CoverCache};
use crate::style;
use crate::subscription;
use crate::theme::{self, AppTheme, ColorScheme};
use crate::widgets;
use crate::window_state::WindowState;

/// Application state. A single view over the top-anime catalog.
pub struct AnimeTrends {
    config: AppConfig,
    client: AnimeTrendsClient,
    state: ViewState,
    // Theme
    current_theme: AppTheme,
    active_mode: ThemeMode,
    // Cover images
    cover_cache: CoverCache,
    // Status bar
    events: EventLog,
    // Window persistence
    window_state: WindowState,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    TopAnimeLoaded(Result<Vec<AnimeSummary>, String>),
    AnimeSelected(Box<AnimeSummary>),
    RecommendationsLoaded {
        ticket: Ticket,
        result: Result<Vec<String>, String>,
    },
    CoverLoaded {
        anime_id: AnimeId,
        url: String,
        result: Result<image::Handle, String>,
    },
    AppearanceTick,
    WindowEvent(window::Event),
}

impl AnimeTrends {
    /// Build the app and start the one-shot top-anime fetch.
    pub fn new(config: AppConfig, client: AnimeTrendsClient) -> (Self, Task<Message>) {
        let active_mode = theme::resolve_mode(config.appearance.mode);
        let mut app = Self {
            config,
            client,
            state: ViewState::new(),
            current_theme: AppTheme::default_theme(),
            active_mode,
            cover_cache: CoverCache::default(),
            events: EventLog::new(),
            window_state: WindowState::load(),
        };
        let task = app.spawn_top_anime();
        (app, task)
    }

    pub fn title(&self) -> String {
        String::from("AnimeTrends")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TopAnimeLoaded(result) => {
                self.events.push(match &result {
                    Ok(anime) => FetchEvent::TopAnimeLoaded { count: anime.len() },
                    Err(message) => FetchEvent::TopAnimeFailed {
                        message: message.clone(),
                    },
                });
                if self.state.finish_initial_load(result) {
                    self.request_covers()
                } else {
                    Task::none()
                }
            }
            Message::AnimeSelected(anime) => self.spawn_recommendations(&anime),
            Message::RecommendationsLoaded { ticket, result } => {
                let title = self
                    .state
                    .recommendations()
                    .pending_title()
                    .unwrap_or_default()
                    .to_string();
                let event = match self.state.apply_recommendations(ticket, result) {
                    RecommendationOutcome::Applied(count) => {
                        FetchEvent::RecommendationsLoaded { title, count }
                    }
                    RecommendationOutcome::Stale => FetchEvent::RecommendationsDiscarded {
                        ticket: ticket.get(),
                    },
                    RecommendationOutcome::Failed(message) => {
                        FetchEvent::RecommendationsFailed { title, message }
                    }
                };
                self.events.push(event);
                Task::none()
            }
            Message::CoverLoaded {
                anime_id,
                url,
                result,
            } => {
                if let Err(message) = &result {
                    tracing::warn!(%url, "Cover download failed: {message}");
                    self.events.push(FetchEvent::CoverFailed {
                        url,
                        message: message.clone(),
                    });
                }
                self.cover_cache.finish(anime_id, result);
                Task::none()
            }
            Message::AppearanceTick => {
                // OS appearance may have changed; only matters in System mode.
                self.active_mode = theme::resolve_mode(self.config.appearance.mode);
                Task::none()
            }
            Message::WindowEvent(event) => {
                match event {
                    window::Event::Resized(size) => {
                        self.window_state.width = size.width;
                        self.window_state.height = size.height;
                        self.window_state.save();
                    }
                    window::Event::Moved(pos) => {
                        self.window_state.x = pos.x;
                        self.window_state.y = pos.y;
                        self.window_state.save();
                    }
                    _ => {}
                }
                Task::none()
            }
        }
    }

    fn spawn_top_anime(&mut self) -> Task<Message> {
        let url = self
            .client
            .top_anime_url()
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.client.base_url().to_string());
        self.events.push(FetchEvent::TopAnimeRequested { url });

        let client = self.client.clone();
        Task::perform(
            async move { client.top_anime().await.map_err(|e| e.to_string()) },
            Message::TopAnimeLoaded,
        )
    }

    fn spawn_recommendations(&mut self, anime: &AnimeSummary) -> Task<Message> {
        let Some(request) = self.state.select(anime) else {
            return Task::none();
        };
        let ticket = request.ticket;
        self.events.push(FetchEvent::RecommendationsRequested {
            title: request.title.clone(),
            ticket: ticket.get(),
        });

        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .recommendations(&request.title)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::RecommendationsLoaded { ticket, result },
        )
    }

    /// Request cover downloads for every loaded anime not yet requested.
    fn request_covers(&mut self) -> Task<Message> {
        let Screen::Grid { anime, .. } = self.state.screen() else {
            return Task::none();
        };

        let mut tasks = Vec::new();
        for entry in anime {
            let Some(raw) = entry.image_url.as_deref() else {
                // No cover URL: mark as failed so the placeholder renders.
                self.cover_cache.mark_failed(&entry.id);
                continue;
            };
            let url = match self.client.asset_url(raw) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    tracing::warn!(anime_id = %entry.id, "Unusable cover URL {raw}: {e}");
                    self.cover_cache.mark_failed(&entry.id);
                    continue;
                }
            };
            if !self.cover_cache.begin(&entry.id) {
                continue;
            }
            let anime_id = entry.id.clone();
            tasks.push(Task::perform(
                cover_cache::fetch_cover(url.clone()),
                move |result| Message::CoverLoaded {
                    anime_id: anime_id.clone(),
                    url: url.clone(),
                    result,
                },
            ));
        }

        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = self.current_theme.colors(self.active_mode);

        match self.state.screen() {
            Screen::Loading => widgets::empty_state(
                cs,
                lucide_icons::iced::icon_clock()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                "Loading...",
                cs.on_surface,
                self.client.base_url().as_str(),
            ),
            Screen::Error(message) => widgets::empty_state(
                cs,
                lucide_icons::iced::icon_circle_x()
                    .size(style::TEXT_3XL)
                    .color(cs.error)
                    .into(),
                message,
                cs.error,
                "Restart AnimeTrends to try again.",
            ),
            Screen::Grid {
                anime,
                recommendations,
            } => {
                let grid = self.grid(cs, anime);
                let mut content = column![self.header(cs, anime.len()), grid]
                    .spacing(style::SPACE_LG)
                    .padding([style::SPACE_LG, style::SPACE_XL])
                    .width(Length::Fill);
                if let Some(recommendations) = recommendations {
                    content = content.push(widgets::recommendation_panel(cs, recommendations));
                }

                let body = widgets::styled_scrollable(content, cs).height(Length::Fill);
                column![body, self.status_bar(cs)].into()
            }
        }
    }

    fn header<'a>(&'a self, cs: &ColorScheme, count: usize) -> Element<'a, Message> {
        row![
            text("Anime Recommender")
                .size(style::TEXT_2XL)
                .font(style::FONT_HEADING)
                .color(cs.on_surface)
                .line_height(style::LINE_HEIGHT_TIGHT),
            Space::new().width(Length::Fill),
            text(format!("Top {count}"))
                .size(style::TEXT_LG)
                .color(cs.on_surface_variant),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn grid<'a>(&'a self, cs: &ColorScheme, anime: &'a [AnimeSummary]) -> Element<'a, Message> {
        if anime.is_empty() {
            return text("The service returned no anime.")
                .size(style::TEXT_SM)
                .color(cs.outline)
                .into();
        }

        let selected = self
            .state
            .recommendations()
            .selected()
            .map(|a| a.id.clone());
        let cards: Vec<Element<'a, Message>> = anime
            .iter()
            .map(|entry| {
                widgets::anime_card(
                    cs,
                    &self.cover_cache,
                    entry,
                    selected.as_ref() == Some(&entry.id),
                    |a| Message::AnimeSelected(Box::new(a.clone())),
                )
            })
            .collect();

        Wrap::with_elements(cards)
            .spacing(style::SPACE_MD)
            .line_spacing(style::SPACE_MD)
            .into()
    }

    fn status_bar<'a>(&'a self, cs: &ColorScheme) -> Element<'a, Message> {
        let latest = self
            .events
            .latest()
            .map(|(at, event)| format!("{} {event}", at.format("%H:%M:%S")))
            .unwrap_or_else(|| "Ready".into());

        let failures = self.events.failure_count();
        let failures_el: Element<'a, Message> = if failures > 0 {
            text(format!("{failures} failed"))
                .size(style::TEXT_XS)
                .color(cs.error)
                .line_height(style::LINE_HEIGHT_LOOSE)
                .into()
        } else {
            Space::new().into()
        };

        container(
            row![
                text(latest)
                    .size(style::TEXT_XS)
                    .line_height(style::LINE_HEIGHT_LOOSE)
                    .width(Length::Fill),
                failures_el,
            ]
            .align_y(Alignment::Center),
        )
        .style(theme::status_bar(cs))
        .width(Length::Fill)
        .height(Length::Fixed(style::STATUS_BAR_HEIGHT))
        .padding([4.0, style::SPACE_MD])
        .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        subscription::subscriptions(self.config.appearance.mode)
    }

    pub fn theme(&self) -> Theme {
        self.current_theme.iced_theme(self.active_mode)
    }
}
