//! Theme — tonal surfaces with an indigo accent, in light and dark.
//!
//! All widget styling is parameterized by a `ColorScheme` so the whole
//! application repaints when the mode flips.

use iced::widget::{button, container, progress_bar, text_input};
use iced::{color, Background, Border, Color, Shadow, Theme, Vector};

use shiori_core::config::ThemeMode;

use crate::style;
use crate::toast::ToastKind;

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

/// All semantic color tokens for the application.
///
/// Construct via `ColorScheme::dark()` or `ColorScheme::light()`.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces (low → high elevation)
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Primary accent (indigo)
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_dim: Color,
    pub on_primary: Color,

    // Status
    pub success: Color,
    pub error: Color,
    pub error_hover: Color,
    pub error_pressed: Color,
    pub on_error: Color,

    pub modal_backdrop: Color,
}

impl ColorScheme {
    /// Dark theme — cool-tinted neutrals with indigo accent.
    pub fn dark() -> Self {
        Self {
            surface: color!(0x101318),
            surface_container_low: color!(0x171B22),
            surface_container: color!(0x1D222B),
            surface_container_high: color!(0x262C37),
            surface_bright: color!(0x303745),

            on_surface: color!(0xE2E6EE),
            on_surface_variant: color!(0xBCC3D1),
            outline: color!(0x868EA0),
            outline_variant: color!(0x3C4352),

            primary: color!(0x9FB4FF),
            primary_hover: color!(0xB4C4FF),
            primary_dim: color!(0x8299E8),
            on_primary: color!(0x14265E),

            success: color!(0x58C78F),
            error: color!(0xFFB4AB),
            error_hover: color!(0xCC3030),
            error_pressed: color!(0xAA2020),
            on_error: Color::WHITE,

            modal_backdrop: Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.7,
            },
        }
    }

    /// Light theme — cool whites with a deeper indigo for contrast.
    pub fn light() -> Self {
        Self {
            surface: color!(0xF9FAFD),
            surface_container_low: color!(0xF1F3F9),
            surface_container: color!(0xE9ECF4),
            surface_container_high: color!(0xE0E4EE),
            surface_bright: color!(0xD4D9E6),

            on_surface: color!(0x1A1C22),
            on_surface_variant: color!(0x444857),
            outline: color!(0x737A8C),
            outline_variant: color!(0xC3C9D8),

            primary: color!(0x3F5AC9),
            primary_hover: color!(0x3550B5),
            primary_dim: color!(0x5C74D6),
            on_primary: Color::WHITE,

            success: color!(0x1D7A4E),
            error: color!(0xBA1A1A),
            error_hover: color!(0x9C1414),
            error_pressed: color!(0x7E0E0E),
            on_error: Color::WHITE,

            modal_backdrop: Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 0.5,
            },
        }
    }

    /// Color scheme for a resolved mode. `System` detects at call time.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match resolve_mode(mode) {
            ThemeMode::Light => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        "Shiori",
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.success,
            warning: cs.primary_dim,
            danger: cs.error,
        },
    )
}

// ── Style functions (parameterized by ColorScheme) ──────────────────

/// A card container: surface background, rounded corners, subtle border.
/// Completed entries get the success color as a left-edge accent border.
pub fn anime_card(cs: &ColorScheme, completed: bool) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = if completed {
        cs.success
    } else {
        cs.outline_variant
    };
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color { a: 0.1, ..Color::BLACK },
            offset: Vector::new(0.0, 1.0),
            blur_radius: 4.0,
        },
        ..Default::default()
    }
}

/// Plain card container, used for the toast banner frame and panels.
pub fn card(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// Accent stripe on the toast banner, colored by message kind.
pub fn banner_accent(cs: &ColorScheme, kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => cs.success,
        ToastKind::Error => cs.error,
        ToastKind::Info => cs.primary,
    }
}

/// A search result row — flat, highlights on hover.
pub fn search_result_item(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered | button::Status::Pressed => {
                (Some(Background::Color(surface_bright)), on_surface)
            }
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_SM.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Static look for the press-and-hold step controls. These are
/// `mouse_area`s, not buttons, so there is no hover status to style.
pub fn step_control(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_SM.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Primary action button.
pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let primary_dim = cs.primary_dim;
    let on_primary = cs.on_primary;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => primary_hover,
            button::Status::Pressed => primary_dim,
            _ => primary,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_primary,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Danger action button (remove confirmation).
pub fn danger_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let error = cs.error;
    let error_hover = cs.error_hover;
    let error_pressed = cs.error_pressed;
    let on_error = cs.on_error;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => error_hover,
            button::Status::Pressed => error_pressed,
            _ => error,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: on_error,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Ghost / outlined button — transparent bg, border outline.
pub fn ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline_variant = cs.outline_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Borderless icon button (theme toggle, toast dismiss, card actions).
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered | button::Status::Pressed => {
                (Some(Background::Color(surface_bright)), on_surface)
            }
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                radius: style::RADIUS_SM.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Text input styling that adapts to the scheme.
pub fn text_input_style(
    cs: &ColorScheme,
) -> impl Fn(&Theme, text_input::Status) -> text_input::Style {
    let primary = cs.primary;
    let outline = cs.outline;
    let outline_variant = cs.outline_variant;
    let surface_container_low = cs.surface_container_low;
    let on_surface_variant = cs.on_surface_variant;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let border_color = match status {
            text_input::Status::Focused { .. } => primary,
            text_input::Status::Hovered => outline,
            _ => outline_variant,
        };
        text_input::Style {
            background: Background::Color(surface_container_low),
            border: Border {
                color: border_color,
                width: 1.0,
                radius: style::RADIUS_SM.into(),
            },
            icon: on_surface_variant,
            placeholder: outline,
            value: on_surface,
            selection: primary,
        }
    }
}

/// Episode progress bar.
pub fn episode_progress(cs: &ColorScheme) -> impl Fn(&Theme) -> progress_bar::Style {
    let track = cs.surface_container_high;
    let bar = cs.primary;
    move |_theme| progress_bar::Style {
        background: Background::Color(track),
        bar: Background::Color(bar),
        border: Border {
            radius: style::RADIUS_SM.into(),
            ..Border::default()
        },
    }
}

/// Cover art placeholder container.
pub fn cover_placeholder(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_MD.into(),
        },
        ..Default::default()
    }
}

/// Dialog container — elevated card for modals.
pub fn dialog_container(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_XL.into(),
        },
        shadow: Shadow {
            color: Color { a: 0.3, ..Color::BLACK },
            offset: Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

/// Semi-transparent backdrop behind a modal.
pub fn modal_backdrop(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.modal_backdrop;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}
