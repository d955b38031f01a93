use animetrends_core::format;
use animetrends_core::view::Recommendations;
use iced::widget::{column, container, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::{self, ColorScheme};

/// The "Recommended Anime" panel shown below the grid.
///
/// Titles are listed in service order; position is their only identity.
pub fn recommendation_panel<'a, Message: 'a>(
    cs: &ColorScheme,
    recommendations: &'a Recommendations,
) -> Element<'a, Message> {
    let source = recommendations.source();

    let mut header = column![text(format::recommendations_heading(source))
        .size(style::TEXT_XL)
        .font(style::FONT_HEADING)
        .color(cs.on_surface)
        .line_height(style::LINE_HEIGHT_TIGHT)]
    .spacing(style::SPACE_XXS);

    if let Some(details) = source.and_then(format::details) {
        header = header.push(
            text(details)
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant)
                .line_height(style::LINE_HEIGHT_LOOSE),
        );
    }

    if let Some(synopsis) = source.and_then(format::synopsis) {
        header = header.push(
            text(synopsis)
                .size(style::TEXT_SM)
                .color(cs.outline)
                .line_height(style::LINE_HEIGHT_NORMAL),
        );
    }

    let items = recommendations
        .titles()
        .iter()
        .enumerate()
        .map(|(index, title)| recommendation_row(cs, index + 1, title));

    let list = Column::with_children(items)
        .spacing(style::SPACE_XS)
        .width(Length::Fill);

    container(
        column![header, list]
            .spacing(style::SPACE_MD)
            .max_width(style::RECOMMENDATIONS_MAX_WIDTH),
    )
    .style(theme::card(cs))
    .padding(style::SPACE_LG)
    .width(Length::Fill)
    .into()
}

fn recommendation_row<'a, Message: 'a>(
    cs: &ColorScheme,
    rank: usize,
    title: &'a str,
) -> Element<'a, Message> {
    let badge = container(
        text(rank.to_string())
            .size(style::TEXT_XS)
            .font(style::FONT_HEADING),
    )
    .center_x(Length::Fixed(style::RANK_BADGE_SIZE))
    .center_y(Length::Fixed(style::RANK_BADGE_SIZE))
    .style(theme::rank_badge(cs));

    container(
        row![
            badge,
            text(title)
                .size(style::TEXT_BASE)
                .line_height(style::LINE_HEIGHT_NORMAL)
                .width(Length::Fill),
        ]
        .spacing(style::SPACE_MD)
        .align_y(Alignment::Center),
    )
    .style(theme::recommendation_item(cs))
    .padding([style::SPACE_SM, style::SPACE_MD])
    .width(Length::Fill)
    .into()
}
