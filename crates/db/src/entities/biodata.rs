//! Biodata (matrimony profile) entity.
//!
//! A biodata record carries two independent status columns:
//!
//! - [`ApprovalStatus`] is owned by admins and reflects the review verdict.
//! - [`VisibilityStatus`] is owned by the profile owner and reflects their
//!   discoverability preference. It only takes effect while the record is
//!   approved; see `milan_core::status` for the derivation rules.

use milan_common::AppError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin-controlled moderation state of a biodata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl ApprovalStatus {
    /// The wire/database string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<&str> for ApprovalStatus {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "inactive" => Ok(Self::Inactive),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }
}

/// Owner-controlled discoverability state of a biodata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum VisibilityStatus {
    #[sea_orm(string_value = "active")]
    #[default]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl VisibilityStatus {
    /// The wire/database string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// The opposite visibility.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl TryFrom<&str> for VisibilityStatus {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(AppError::InvalidStatus(other.to_string())),
        }
    }
}

/// Which side of the match this biodata describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
#[serde(rename_all = "lowercase")]
pub enum BiodataKind {
    #[sea_orm(string_value = "groom")]
    Groom,
    #[sea_orm(string_value = "bride")]
    Bride,
}

impl TryFrom<&str> for BiodataKind {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "groom" => Ok(Self::Groom),
            "bride" => Ok(Self::Bride),
            other => Err(AppError::BadRequest(format!("Unknown biodata kind: {other}"))),
        }
    }
}

/// Biodata record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "biodata")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning user. One biodata per user.
    #[sea_orm(unique)]
    pub user_id: String,

    /// Groom or bride profile.
    pub kind: BiodataKind,

    pub full_name: String,

    pub date_of_birth: Date,

    pub marital_status: String,

    /// Current city / district
    #[sea_orm(nullable)]
    pub location: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub education: Option<String>,

    #[sea_orm(nullable)]
    pub occupation: Option<String>,

    /// Free-text description of the expected partner
    #[sea_orm(column_type = "Text", nullable)]
    pub expected_partner: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,

    #[sea_orm(nullable)]
    pub contact_email: Option<String>,

    #[sea_orm(nullable)]
    pub contact_phone: Option<String>,

    /// Form sections the owner has completed so far
    pub completed_sections: Json,

    /// Admin review verdict
    pub approval_status: ApprovalStatus,

    /// Owner discoverability preference (effective only while approved)
    pub visibility_status: VisibilityStatus,

    /// Admin who reviewed the submission
    #[sea_orm(nullable)]
    pub reviewed_by: Option<String>,

    /// Note from reviewer (e.g. rejection reason)
    #[sea_orm(column_type = "Text", nullable)]
    pub review_note: Option<String>,

    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
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
        belongs_to = "super::user::Entity",
        from = "Column::ReviewedBy",
        to = "super::user::Column::Id"
    )]
    Reviewer,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_round_trip() {
        for s in ["pending", "approved", "rejected", "inactive"] {
            let parsed = ApprovalStatus::try_from(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn test_unknown_approval_status_rejected() {
        let err = ApprovalStatus::try_from("archived").unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));
    }

    #[test]
    fn test_unknown_visibility_status_rejected() {
        let err = VisibilityStatus::try_from("hidden").unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));
    }

    #[test]
    fn test_visibility_toggled_is_involutive() {
        assert_eq!(VisibilityStatus::Active.toggled(), VisibilityStatus::Inactive);
        assert_eq!(VisibilityStatus::Active.toggled().toggled(), VisibilityStatus::Active);
    }
}
