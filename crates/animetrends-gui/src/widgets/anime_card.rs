use animetrends_api::AnimeSummary;
use animetrends_core::format;
use iced::widget::{button, column, container, text};
use iced::{Element, Length};

use crate::cover_cache::CoverCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Card width: cover + horizontal padding inside the card.
pub const CARD_WIDTH: f32 = style::COVER_WIDTH + 2.0 * style::SPACE_SM;

/// A compact anime card for the grid.
///
/// Shows the cover image, title, score and genres. Pressing the card emits
/// whatever `on_select` builds from the anime. The card holds no state.
pub fn anime_card<'a, Message: Clone + 'static>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    anime: &'a AnimeSummary,
    selected: bool,
    on_select: impl Fn(&AnimeSummary) -> Message,
) -> Element<'a, Message> {
    let cover = widgets::rounded_cover(
        cs,
        covers,
        &anime.id,
        style::COVER_WIDTH,
        style::COVER_HEIGHT,
        style::RADIUS_MD,
    );

    // Title (clipped to 2 lines via container height)
    let title_el = container(
        text(anime.title.as_str())
            .size(style::TEXT_SM)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(iced::widget::text::Wrapping::WordOrGlyph),
    )
    .height(Length::Fixed(
        style::TEXT_SM * style::LINE_HEIGHT_NORMAL * 2.0 + 2.0,
    ))
    .clip(true);

    let score_el = text(format::score(anime.score))
        .size(style::TEXT_XS)
        .color(cs.tertiary)
        .line_height(style::LINE_HEIGHT_LOOSE);

    let genres_el = text(format::genres(&anime.genres))
        .size(style::TEXT_XS)
        .color(cs.on_surface_variant)
        .line_height(style::LINE_HEIGHT_LOOSE)
        .wrapping(iced::widget::text::Wrapping::Word);

    let card_content = column![cover, title_el, score_el, genres_el]
        .spacing(style::SPACE_XS)
        .padding(style::SPACE_SM)
        .width(Length::Fixed(CARD_WIDTH));

    let inner = container(card_content).style(theme::anime_card_style(cs, selected));

    button(inner)
        .padding(0)
        .width(Length::Fixed(CARD_WIDTH))
        .on_press(on_select(anime))
        .style(theme::anime_card_button(cs))
        .into()
}
