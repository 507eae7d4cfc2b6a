//! Biodata status derivation.
//!
//! A biodata record stores two independent statuses: the admin-owned
//! [`ApprovalStatus`] and the owner-owned [`VisibilityStatus`]. Widgets
//! display a single effective status, derived here:
//!
//! - While the record is not approved, the approval status wins and the
//!   owner cannot toggle visibility.
//! - Once approved, the owner's visibility preference wins and the toggle
//!   is enabled.
//!
//! The derivation is pure and total over the two enums. Both underlying
//! statuses stay available on the record itself; an approved-but-hidden
//! profile and an admin-deactivated profile both display as `inactive`, and
//! only the stored pair can tell them apart.

use milan_db::entities::biodata::{ApprovalStatus, VisibilityStatus};
use serde::Serialize;

/// The single display-facing status derived from the stored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    /// Awaiting admin review.
    Pending,
    /// Rejected by an admin.
    Rejected,
    /// Approved and discoverable.
    Active,
    /// Hidden, either by the owner or by an admin.
    Inactive,
}

impl EffectiveStatus {
    /// The wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for EffectiveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of [`derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatus {
    /// What a human-facing widget should display.
    pub effective: EffectiveStatus,
    /// Whether the owner's visibility toggle is enabled.
    pub can_user_toggle: bool,
}

/// Derive the effective status and toggle permission from the stored pair.
///
/// Visibility only matters while the record is approved; in every other
/// approval state the visibility value is ignored and the toggle disabled.
#[must_use]
pub const fn derive_status(
    approval: ApprovalStatus,
    visibility: VisibilityStatus,
) -> DerivedStatus {
    match approval {
        ApprovalStatus::Approved => DerivedStatus {
            effective: match visibility {
                VisibilityStatus::Active => EffectiveStatus::Active,
                VisibilityStatus::Inactive => EffectiveStatus::Inactive,
            },
            can_user_toggle: true,
        },
        ApprovalStatus::Pending => DerivedStatus {
            effective: EffectiveStatus::Pending,
            can_user_toggle: false,
        },
        ApprovalStatus::Rejected => DerivedStatus {
            effective: EffectiveStatus::Rejected,
            can_user_toggle: false,
        },
        ApprovalStatus::Inactive => DerivedStatus {
            effective: EffectiveStatus::Inactive,
            can_user_toggle: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_wins_over_visibility() {
        let derived = derive_status(ApprovalStatus::Pending, VisibilityStatus::Active);
        assert_eq!(derived.effective, EffectiveStatus::Pending);
        assert_eq!(derived.effective.as_str(), "pending");
        assert!(!derived.can_user_toggle);
    }

    #[test]
    fn test_approved_active() {
        let derived = derive_status(ApprovalStatus::Approved, VisibilityStatus::Active);
        assert_eq!(derived.effective, EffectiveStatus::Active);
        assert!(derived.can_user_toggle);
    }

    #[test]
    fn test_approved_owner_hidden() {
        let derived = derive_status(ApprovalStatus::Approved, VisibilityStatus::Inactive);
        assert_eq!(derived.effective, EffectiveStatus::Inactive);
        assert!(derived.can_user_toggle);
    }

    #[test]
    fn test_rejected() {
        let derived = derive_status(ApprovalStatus::Rejected, VisibilityStatus::Active);
        assert_eq!(derived.effective, EffectiveStatus::Rejected);
        assert!(!derived.can_user_toggle);
    }

    #[test]
    fn test_admin_deactivated() {
        let derived = derive_status(ApprovalStatus::Inactive, VisibilityStatus::Active);
        assert_eq!(derived.effective, EffectiveStatus::Inactive);
        assert!(!derived.can_user_toggle);
    }

    #[test]
    fn test_display_collision_keeps_sources_apart() {
        // Owner-hidden and admin-deactivated display the same string but
        // differ in toggle permission and in the stored pair.
        let owner_hidden = derive_status(ApprovalStatus::Approved, VisibilityStatus::Inactive);
        let admin_deactivated = derive_status(ApprovalStatus::Inactive, VisibilityStatus::Active);

        assert_eq!(owner_hidden.effective.as_str(), "inactive");
        assert_eq!(admin_deactivated.effective.as_str(), "inactive");
        assert_ne!(owner_hidden.can_user_toggle, admin_deactivated.can_user_toggle);
    }

    #[test]
    fn test_visibility_irrelevant_unless_approved() {
        for approval in [
            ApprovalStatus::Pending,
            ApprovalStatus::Rejected,
            ApprovalStatus::Inactive,
        ] {
            let with_active = derive_status(approval, VisibilityStatus::Active);
            let with_inactive = derive_status(approval, VisibilityStatus::Inactive);
            assert_eq!(with_active, with_inactive);
            assert!(!with_active.can_user_toggle);
        }
    }

    #[test]
    fn test_derivation_is_pure() {
        let first = derive_status(ApprovalStatus::Approved, VisibilityStatus::Inactive);
        let second = derive_status(ApprovalStatus::Approved, VisibilityStatus::Inactive);
        assert_eq!(first, second);
    }
}
