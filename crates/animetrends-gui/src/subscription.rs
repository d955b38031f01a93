use std::time::Duration;

use iced::{window, Subscription};

use crate::app::Message;
use crate::theme::ThemeMode;

/// How often the OS appearance is re-checked while following the system.
const APPEARANCE_POLL_SECS: u64 = 5;

/// All app subscriptions: window geometry changes and, in `System` mode,
/// a periodic appearance check.
pub fn subscriptions(mode: ThemeMode) -> Subscription<Message> {
    let window_events = iced::event::listen_with(|event, _status, _id| match event {
        iced::Event::Window(e @ (window::Event::Resized(_) | window::Event::Moved(_))) => {
            Some(Message::WindowEvent(e))
        }
        _ => None,
    });

    let appearance = if mode == ThemeMode::System {
        iced::time::every(Duration::from_secs(APPEARANCE_POLL_SECS))
            .map(|_| Message::AppearanceTick)
    } else {
        Subscription::none()
    };

    Subscription::batch([window_events, appearance])
}
