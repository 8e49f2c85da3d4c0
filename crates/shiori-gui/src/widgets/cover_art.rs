use iced::widget::container;
use iced::{ContentFit, Element, Length};

use crate::cover_cache::{CoverCache, CoverState};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Cover art for a tracked entry, in a fixed rounded frame.
///
/// A cached file is drawn cropped to fill the frame. Anything else
/// (still downloading, failed, no image on the backend) shows a glyph
/// on the placeholder background, so the card layout never shifts.
pub fn cover_art<'a, Message: 'static>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    id: i64,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let frame = container(match covers.state(id) {
        Some(CoverState::Loaded(path)) => Element::from(
            iced::widget::image(path.as_path())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .border_radius(style::RADIUS_MD),
        ),
        Some(CoverState::Loading) => placeholder_glyph(cs, lucide_icons::iced::icon_loader()),
        _ => placeholder_glyph(cs, lucide_icons::iced::icon_image_off()),
    })
    .width(Length::Fixed(width))
    .height(Length::Fixed(height))
    .center_x(Length::Fixed(width))
    .center_y(Length::Fixed(height))
    .style(theme::cover_placeholder(cs));

    frame.into()
}

fn placeholder_glyph<'a, Message: 'a>(
    cs: &ColorScheme,
    icon: iced::widget::Text<'a>,
) -> Element<'a, Message> {
    icon.size(style::TEXT_3XL).color(cs.outline).center().into()
}
