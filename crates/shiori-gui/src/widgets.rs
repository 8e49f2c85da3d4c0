pub mod anime_card;
pub mod cover_art;
pub mod empty_state;
pub mod modal;

pub use anime_card::anime_card;
pub use cover_art::cover_art;
pub use empty_state::empty_state;
pub use modal::modal;
