//! Database entities.

pub mod biodata;
pub mod favorite;
pub mod user;

pub use biodata::Entity as Biodata;
pub use favorite::Entity as Favorite;
pub use user::Entity as User;
