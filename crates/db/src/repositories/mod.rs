//! Database repositories.

mod biodata;
mod favorite;
mod user;

pub use biodata::{BiodataFilter, BiodataRepository};
pub use favorite::FavoriteRepository;
pub use user::UserRepository;
