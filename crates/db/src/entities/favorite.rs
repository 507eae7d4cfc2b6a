//! Biodata favorite entity.

use sea_orm::entity::prelude::*;

/// Biodata favorite entity.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "favorite")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who favorited the biodata.
    pub user_id: String,

    /// Biodata that was favorited.
    pub biodata_id: String,

    /// When the favorite was created.
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::biodata::Entity",
        from = "Column::BiodataId",
        to = "super::biodata::Column::Id"
    )]
    Biodata,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::biodata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Biodata.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
