use iced::widget::{button, column, container, mouse_area, progress_bar, row, text};
use iced::{Alignment, Element, Length};

use shiori_core::models::Anime;

use crate::cover_cache::CoverCache;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Card width: cover + horizontal padding inside the card.
pub const CARD_WIDTH: f32 = style::COVER_WIDTH + 2.0 * style::SPACE_SM;

/// A grid card for one tracked entry.
///
/// Cover and title open the details modal. The +/- episode controls
/// are `mouse_area`s rather than buttons: buttons publish on release,
/// while press-and-hold needs the press-down itself so the repeat can
/// arm. Release is observed by the grid-level `mouse_area` in the app
/// view.
pub fn anime_card<'a, Message: Clone + 'static>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    anime: &'a Anime,
    on_open: Message,
    on_remove: Message,
    on_decrement_press: Message,
    on_increment_press: Message,
) -> Element<'a, Message> {
    let cover = widgets::cover_art(
        cs,
        covers,
        anime.id,
        style::COVER_WIDTH,
        style::COVER_HEIGHT,
    );

    // Title (clipped to 2 lines via container height)
    let title = container(
        text(anime.title.as_str())
            .size(style::TEXT_SM)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .wrapping(iced::widget::text::Wrapping::WordOrGlyph),
    )
    .height(Length::Fixed(
        style::TEXT_SM * style::LINE_HEIGHT_NORMAL * 2.0 + 2.0,
    ))
    .clip(true);

    let meta = {
        let dates = anime.date_range();
        let label = if dates.is_empty() {
            anime.anime_type.clone()
        } else if anime.anime_type.is_empty() {
            dates
        } else {
            format!("{}  \u{00B7}  {}", anime.anime_type, dates)
        };
        text(label)
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_LOOSE)
    };

    let episodes = if anime.total_episodes > 0 {
        format!("{} / {}", anime.watched_episodes, anime.total_episodes)
    } else {
        format!("{} / ?", anime.watched_episodes)
    };

    let progress = row![
        progress_bar(0.0..=100.0, anime.progress_percent() as f32)
            .girth(Length::Fixed(style::PROGRESS_HEIGHT))
            .style(theme::episode_progress(cs)),
        text(format!("{}%", anime.progress_percent()))
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant),
    ]
    .spacing(style::SPACE_XS)
    .align_y(Alignment::Center);

    let step = |icon: iced::widget::Text<'static>, on_press: Message| {
        mouse_area(
            container(icon.size(style::TEXT_SM).color(cs.on_surface).center())
                .width(Length::Fixed(style::STEP_BUTTON_SIZE))
                .height(Length::Fixed(style::STEP_BUTTON_SIZE))
                .style(theme::step_control(cs)),
        )
        .on_press(on_press)
    };

    let controls = row![
        step(lucide_icons::iced::icon_minus(), on_decrement_press),
        text(episodes)
            .size(style::TEXT_XS)
            .color(cs.on_surface_variant)
            .width(Length::Fill)
            .center(),
        step(lucide_icons::iced::icon_plus(), on_increment_press),
        button(
            lucide_icons::iced::icon_trash_2()
                .size(style::TEXT_SM)
                .color(cs.error),
        )
        .padding(style::SPACE_XS)
        .on_press(on_remove)
        .style(theme::icon_button(cs)),
    ]
    .spacing(style::SPACE_XS)
    .align_y(Alignment::Center);

    let body = column![
        mouse_area(column![cover, title].spacing(style::SPACE_XS)).on_press(on_open),
        meta,
        progress,
        controls,
    ]
    .spacing(style::SPACE_XS)
    .padding(style::SPACE_SM)
    .width(Length::Fixed(CARD_WIDTH));

    container(body)
        .style(theme::anime_card(cs, anime.is_completed()))
        .into()
}
