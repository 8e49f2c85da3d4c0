use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::{self, ColorScheme};

/// Kind of banner message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// The single transient banner.
///
/// `id` ties the 4-second expiry task to the message it was scheduled
/// for: a newer message bumps the id, so a stale expiry is ignored
/// instead of cutting the replacement short.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Auto-dismiss delay in seconds.
pub const AUTO_DISMISS_SECS: u64 = 4;

/// Render the banner, anchored top-right over the content.
pub fn banner<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    toast: &'a Toast,
    on_dismiss: Message,
) -> Element<'a, Message> {
    let accent = theme::banner_accent(cs, toast.kind);

    let icon = match toast.kind {
        ToastKind::Success => lucide_icons::iced::icon_circle_check(),
        ToastKind::Error => lucide_icons::iced::icon_circle_x(),
        ToastKind::Info => lucide_icons::iced::icon_info(),
    };

    let card = container(
        row![
            icon.size(style::TEXT_LG).color(accent),
            text(toast.message.as_str())
                .size(style::TEXT_SM)
                .line_height(style::LINE_HEIGHT_NORMAL)
                .width(Length::Fill),
            button(
                lucide_icons::iced::icon_x()
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant),
            )
            .on_press(on_dismiss)
            .padding(style::SPACE_XXS)
            .style(theme::icon_button(cs)),
        ]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center),
    )
    .style(theme::card(cs))
    .padding([style::SPACE_SM, style::SPACE_MD])
    .width(Length::Fixed(340.0));

    container(card)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding([style::SPACE_MD, style::SPACE_XL])
        .into()
}
