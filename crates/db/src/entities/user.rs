//! User entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    pub username_lower: String,

    /// Access token
    #[sea_orm(unique, nullable)]
    pub token: Option<String>,

    /// Argon2 password hash
    #[sea_orm(nullable)]
    pub password_hash: Option<String>,

    /// Display name
    #[sea_orm(nullable)]
    pub name: Option<String>,

    /// Contact email
    #[sea_orm(nullable)]
    pub email: Option<String>,

    /// Contact phone number
    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Is this user an admin?
    #[sea_orm(default_value = false)]
    pub is_admin: bool,

    /// Is this account suspended?
    #[sea_orm(default_value = false)]
    pub is_suspended: bool,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::biodata::Entity")]
    Biodata,

    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::biodata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Biodata.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
