use iced::widget::{center, column, text};
use iced::{Alignment, Color, Element, Length};

use crate::style;
use crate::theme::ColorScheme;

/// A centered state with icon, title, and subtitle.
///
/// Used for the loading and error screens, which replace the whole view.
pub fn empty_state<'a, Message: 'a>(
    cs: &ColorScheme,
    icon: Element<'a, Message>,
    title: &'a str,
    title_color: Color,
    subtitle: &'a str,
) -> Element<'a, Message> {
    let content = column![
        icon,
        text(title)
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(title_color)
            .line_height(style::LINE_HEIGHT_TIGHT),
        text(subtitle)
            .size(style::TEXT_SM)
            .color(cs.outline)
            .line_height(style::LINE_HEIGHT_LOOSE),
    ]
    .spacing(style::SPACE_MD)
    .padding(style::SPACE_XL)
    .align_x(Alignment::Center);

    center(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
