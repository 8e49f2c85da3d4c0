//! Design tokens: spacing, typography, and layout constants.
//!
//! All spacing is based on a 4px grid.

// ── Spacing (4px base grid) ──────────────────────────────────────

pub const SPACE_XXS: f32 = 2.0;
pub const SPACE_XS: f32 = 4.0;
pub const SPACE_SM: f32 = 8.0;
pub const SPACE_MD: f32 = 12.0;
pub const SPACE_LG: f32 = 16.0;
pub const SPACE_XL: f32 = 24.0;
pub const SPACE_2XL: f32 = 32.0;

// ── Typography ───────────────────────────────────────────────────

pub const TEXT_XS: f32 = 11.0;
pub const TEXT_SM: f32 = 12.0;
pub const TEXT_LG: f32 = 16.0;
pub const TEXT_XL: f32 = 22.0;
pub const TEXT_3XL: f32 = 36.0;

// Line heights (multipliers for `LineHeight::Relative`)
pub const LINE_HEIGHT_TIGHT: f32 = 1.2; // headings
pub const LINE_HEIGHT_NORMAL: f32 = 1.45; // body text, labels
pub const LINE_HEIGHT_LOOSE: f32 = 1.6; // small/caption text

// ── Layout ───────────────────────────────────────────────────────

pub const COVER_WIDTH: f32 = 130.0;
pub const COVER_HEIGHT: f32 = 185.0;
pub const DETAIL_COVER_WIDTH: f32 = 180.0;
pub const DETAIL_COVER_HEIGHT: f32 = 256.0;
pub const SEARCH_BAR_WIDTH: f32 = 420.0;

// ── Controls ─────────────────────────────────────────────────────

pub const STEP_BUTTON_SIZE: f32 = 26.0;
pub const PROGRESS_HEIGHT: f32 = 6.0;

// ── Border radii ─────────────────────────────────────────────────

pub const RADIUS_SM: f32 = 4.0;
pub const RADIUS_MD: f32 = 8.0;
pub const RADIUS_LG: f32 = 12.0;
pub const RADIUS_XL: f32 = 16.0;
