//! Modal overlay built from iced's stack/opaque primitives.
//!
//! The dialog is centered over a translucent backdrop. A press on the
//! backdrop publishes `on_blur`; presses over the dialog itself are
//! captured by the inner `opaque` and never reach the backdrop, so the
//! content stays interactive without dismissing.

use iced::widget::{center, mouse_area, opaque, stack};
use iced::Element;

use crate::theme::{self, ColorScheme};

pub fn modal<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    let backdrop = center(opaque(content.into())).style(theme::modal_backdrop(cs));

    stack([
        base.into(),
        opaque(mouse_area(backdrop).on_press(on_blur)),
    ])
    .into()
}
