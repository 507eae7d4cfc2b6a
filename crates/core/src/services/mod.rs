//! Business logic services.

pub mod biodata;
pub mod favorite;
pub mod moderation;
pub mod user;

pub use biodata::{BiodataSearchInput, BiodataService, CreateBiodataInput, UpdateBiodataInput};
pub use favorite::FavoriteService;
pub use moderation::ModerationService;
pub use user::{CreateUserInput, UserService};

const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Clamp a requested page size to the configured maximum.
///
/// Every list-returning operation goes through this, so the
/// `moderation.max_search_limit` knob is the single cap policy.
pub(crate) fn page_limit(requested: Option<u64>, max: u64) -> u64 {
    requested.unwrap_or(DEFAULT_PAGE_LIMIT).min(max)
}
