use iced::Subscription;

use shiori_core::hold::REPEAT_TICK;

use crate::app::Message;

/// Timer that drives press-and-hold repeats. Only subscribed while a
/// control is actually held, so an idle app schedules no wakeups.
pub fn hold_repeat() -> Subscription<Message> {
    iced::time::every(REPEAT_TICK).map(|_| Message::HoldTick)
}

/// Escape closes whichever modal is open.
pub fn escape_key() -> Subscription<Message> {
    iced::keyboard::listen().filter_map(|event| match event {
        iced::keyboard::Event::KeyPressed {
            key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
            ..
        } => Some(Message::DismissModal),
        _ => None,
    })
}
