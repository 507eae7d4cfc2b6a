//! Biodata service.
//!
//! Owns the lifecycle of a matrimony profile: creation, section-by-section
//! form updates, the owner's visibility toggle and the discoverable
//! browse/search views. Review verdicts are applied by
//! [`super::ModerationService`].

use chrono::Months;
use milan_common::{AppError, AppResult, Config, IdGenerator};
use milan_db::{
    entities::biodata::{self, ApprovalStatus, BiodataKind, VisibilityStatus},
    repositories::{BiodataFilter, BiodataRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::status::{derive_status, DerivedStatus};

/// Form sections, in the order the client presents them.
pub const SECTIONS: [&str; 5] = [
    "general",
    "location",
    "education",
    "expected_partner",
    "contact",
];

/// Biodata service for profile management.
#[derive(Clone)]
pub struct BiodataService {
    biodata_repo: BiodataRepository,
    id_gen: IdGenerator,
    auto_approve: bool,
    max_search_limit: u64,
}

/// Input for creating a biodata (the first form step).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBiodataInput {
    /// `"groom"` or `"bride"`.
    pub kind: String,

    #[validate(length(min = 1, max = 256))]
    pub full_name: String,

    pub date_of_birth: chrono::NaiveDate,

    #[validate(length(min = 1, max = 32))]
    pub marital_status: String,
}

/// Input for updating a biodata section by section. Absent fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBiodataInput {
    #[validate(length(min = 1, max = 256))]
    pub full_name: Option<String>,

    pub date_of_birth: Option<chrono::NaiveDate>,

    #[validate(length(min = 1, max = 32))]
    pub marital_status: Option<String>,

    #[validate(length(max = 256))]
    pub location: Option<String>,

    #[validate(length(max = 4096))]
    pub education: Option<String>,

    #[validate(length(max = 256))]
    pub occupation: Option<String>,

    #[validate(length(max = 4096))]
    pub expected_partner: Option<String>,

    #[validate(length(max = 4096))]
    pub about: Option<String>,

    #[validate(email)]
    pub contact_email: Option<String>,

    #[validate(length(max = 32))]
    pub contact_phone: Option<String>,
}

/// Input for browsing discoverable biodatas.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiodataSearchInput {
    /// `"groom"` or `"bride"`.
    pub kind: Option<String>,
    pub marital_status: Option<String>,
    pub location: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

impl BiodataService {
    /// Create a new biodata service.
    #[must_use]
    pub fn new(biodata_repo: BiodataRepository, config: &Config) -> Self {
        Self {
            biodata_repo,
            id_gen: IdGenerator::new(),
            auto_approve: config.moderation.auto_approve,
            max_search_limit: config.moderation.max_search_limit,
        }
    }

    /// Derive the display status and toggle permission for a record.
    #[must_use]
    pub const fn derived(model: &biodata::Model) -> DerivedStatus {
        derive_status(model.approval_status, model.visibility_status)
    }

    /// Create a biodata for a user. One per user.
    pub async fn create(
        &self,
        user_id: &str,
        input: CreateBiodataInput,
    ) -> AppResult<biodata::Model> {
        input.validate()?;

        if self.biodata_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "User already has a biodata".to_string(),
            ));
        }

        let kind = BiodataKind::try_from(input.kind.as_str())?;
        let approval = if self.auto_approve {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        };

        let model = biodata::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            kind: Set(kind),
            full_name: Set(input.full_name),
            date_of_birth: Set(input.date_of_birth),
            marital_status: Set(input.marital_status),
            completed_sections: Set(serde_json::json!(["general"])),
            approval_status: Set(approval),
            visibility_status: Set(VisibilityStatus::Active),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.biodata_repo.create(model).await
    }

    /// Get the biodata owned by a user.
    pub async fn get_own(&self, user_id: &str) -> AppResult<biodata::Model> {
        self.biodata_repo.get_by_user_id(user_id).await
    }

    /// Update the owner's biodata.
    ///
    /// Completed sections are recomputed from the stored fields rather than
    /// trusted from the client. Editing a record that has already been
    /// reviewed sends it back to the review queue.
    pub async fn update(
        &self,
        user_id: &str,
        input: UpdateBiodataInput,
    ) -> AppResult<biodata::Model> {
        input.validate()?;

        let current = self.biodata_repo.get_by_user_id(user_id).await?;
        let was_reviewed = current.approval_status != ApprovalStatus::Pending;
        let mut active: biodata::ActiveModel = current.into();

        if let Some(full_name) = input.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(dob) = input.date_of_birth {
            active.date_of_birth = Set(dob);
        }
        if let Some(marital) = input.marital_status {
            active.marital_status = Set(marital);
        }
        if let Some(location) = input.location {
            active.location = Set(Some(location));
        }
        if let Some(education) = input.education {
            active.education = Set(Some(education));
        }
        if let Some(occupation) = input.occupation {
            active.occupation = Set(Some(occupation));
        }
        if let Some(expected) = input.expected_partner {
            active.expected_partner = Set(Some(expected));
        }
        if let Some(about) = input.about {
            active.about = Set(Some(about));
        }
        if let Some(email) = input.contact_email {
            active.contact_email = Set(Some(email));
        }
        if let Some(phone) = input.contact_phone {
            active.contact_phone = Set(Some(phone));
        }

        active.completed_sections = Set(completed_sections(&active));

        if was_reviewed && !self.auto_approve {
            // Resubmission: edited content needs a fresh review
            active.approval_status = Set(ApprovalStatus::Pending);
            active.reviewed_by = Set(None);
            active.review_note = Set(None);
            active.reviewed_at = Set(None);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.biodata_repo.update(active).await
    }

    /// Toggle the owner's visibility preference.
    ///
    /// Only allowed while the record is approved. On any persistence failure
    /// nothing is flipped; the stored pair stays at its last confirmed value.
    pub async fn toggle_visibility(&self, user_id: &str) -> AppResult<biodata::Model> {
        let current = self.biodata_repo.get_by_user_id(user_id).await?;

        let derived = Self::derived(&current);
        if !derived.can_user_toggle {
            return Err(AppError::Forbidden(
                "Visibility can only be changed once the biodata is approved".to_string(),
            ));
        }

        let next = current.visibility_status.toggled();
        tracing::debug!(
            user_id = %user_id,
            from = current.visibility_status.as_str(),
            to = next.as_str(),
            "Toggling biodata visibility"
        );

        let mut active: biodata::ActiveModel = current.into();
        active.visibility_status = Set(next);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.biodata_repo.update(active).await
    }

    /// Get a biodata as seen by a viewer.
    ///
    /// The owner always sees their own record. Everyone else only sees
    /// discoverable records; anything hidden reads as not found.
    pub async fn get_for_viewer(
        &self,
        viewer_id: Option<&str>,
        biodata_id: &str,
    ) -> AppResult<biodata::Model> {
        let model = self.biodata_repo.get_by_id(biodata_id).await?;

        if viewer_id == Some(model.user_id.as_str()) {
            return Ok(model);
        }

        let derived = Self::derived(&model);
        if derived.effective != crate::status::EffectiveStatus::Active {
            return Err(AppError::BiodataNotFound(biodata_id.to_string()));
        }

        Ok(model)
    }

    /// Browse discoverable biodatas with optional filters.
    pub async fn search(&self, input: BiodataSearchInput) -> AppResult<Vec<biodata::Model>> {
        let mut filter = BiodataFilter {
            marital_status: input.marital_status,
            location: input.location,
            ..Default::default()
        };

        if let Some(ref kind) = input.kind {
            filter.kind = Some(BiodataKind::try_from(kind.as_str())?);
        }

        let today = chrono::Utc::now().date_naive();
        (filter.born_after, filter.born_before) =
            birth_date_bounds(today, input.min_age, input.max_age);

        if matches!((filter.born_after, filter.born_before), (Some(a), Some(b)) if a > b) {
            return Err(AppError::BadRequest("Empty age range".to_string()));
        }

        let limit = super::page_limit(input.limit, self.max_search_limit);

        self.biodata_repo
            .find_discoverable(&filter, limit, input.until_id.as_deref())
            .await
    }
}

/// Convert requested age bounds into date-of-birth bounds relative to
/// `today`.
///
/// Ages are clamped to 150 years. The lower date bound starts one day after
/// `today - (max_age + 1)` years, so someone turning `max_age + 1` exactly
/// today falls out of range.
fn birth_date_bounds(
    today: chrono::NaiveDate,
    min_age: Option<u32>,
    max_age: Option<u32>,
) -> (Option<chrono::NaiveDate>, Option<chrono::NaiveDate>) {
    // At least min_age years old: born on or before today - min_age
    let born_before =
        min_age.and_then(|min| today.checked_sub_months(Months::new(min.min(150) * 12)));

    // At most max_age years old: born strictly after today - (max_age + 1)
    let born_after = max_age.and_then(|max| {
        today
            .checked_sub_months(Months::new((max.min(150) + 1) * 12))
            .and_then(|d| d.succ_opt())
    });

    (born_after, born_before)
}

/// Recompute which form sections are complete from the stored fields.
///
/// Sections come back in [`SECTIONS`] order; `general` is always present
/// because its fields are required at creation.
fn completed_sections(active: &biodata::ActiveModel) -> serde_json::Value {
    use sea_orm::ActiveValue;

    fn set_some(value: &ActiveValue<Option<String>>) -> bool {
        matches!(value, ActiveValue::Set(Some(s)) | ActiveValue::Unchanged(Some(s)) if !s.is_empty())
    }

    let done: Vec<&str> = SECTIONS
        .into_iter()
        .filter(|&section| match section {
            "general" => true,
            "location" => set_some(&active.location),
            "education" => set_some(&active.education) || set_some(&active.occupation),
            "expected_partner" => set_some(&active.expected_partner),
            "contact" => set_some(&active.contact_email) || set_some(&active.contact_phone),
            _ => false,
        })
        .collect();
    serde_json::json!(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use milan_common::config::{DatabaseConfig, ModerationConfig, ServerConfig};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn test_config() -> Config {
        Config {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/milan_test".to_string(),
                max_connections: 5,
                min_connections: 1,
            },
            moderation: ModerationConfig {
                auto_approve: false,
                max_search_limit: 100,
            },
        }
    }

    fn create_test_biodata(
        id: &str,
        user_id: &str,
        approval: ApprovalStatus,
        visibility: VisibilityStatus,
    ) -> biodata::Model {
        biodata::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind: BiodataKind::Bride,
            full_name: "Test Person".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1996, 7, 2).unwrap(),
            marital_status: "never_married".to_string(),
            location: None,
            education: None,
            occupation: None,
            expected_partner: None,
            about: None,
            contact_email: None,
            contact_phone: None,
            completed_sections: json!(["general"]),
            approval_status: approval,
            visibility_status: visibility,
            reviewed_by: None,
            review_note: None,
            reviewed_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> BiodataService {
        BiodataService::new(BiodataRepository::new(db), &test_config())
    }

    #[tokio::test]
    async fn test_create_conflict_when_biodata_exists() {
        let existing =
            create_test_biodata("bd1", "user1", ApprovalStatus::Pending, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "user1",
                CreateBiodataInput {
                    kind: "bride".to_string(),
                    full_name: "Test Person".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1996, 7, 2).unwrap(),
                    marital_status: "never_married".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_kind() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<biodata::Model>::new()])
                .into_connection(),
        );

        let result = service(db)
            .create(
                "user1",
                CreateBiodataInput {
                    kind: "other".to_string(),
                    full_name: "Test Person".to_string(),
                    date_of_birth: NaiveDate::from_ymd_opt(1996, 7, 2).unwrap(),
                    marital_status: "never_married".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_toggle_rejected_while_pending() {
        let pending =
            create_test_biodata("bd1", "user1", ApprovalStatus::Pending, VisibilityStatus::Active);

        // Only the fetch is mocked: a forbidden toggle must not issue an update
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let result = service(db).toggle_visibility("user1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_toggle_flips_visibility_when_approved() {
        let approved =
            create_test_biodata("bd1", "user1", ApprovalStatus::Approved, VisibilityStatus::Active);
        let mut toggled = approved.clone();
        toggled.visibility_status = VisibilityStatus::Inactive;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![approved], vec![toggled]])
                .into_connection(),
        );

        let result = service(db).toggle_visibility("user1").await.unwrap();

        assert_eq!(result.visibility_status, VisibilityStatus::Inactive);
        // Approval untouched by the owner's toggle
        assert_eq!(result.approval_status, ApprovalStatus::Approved);
    }

    #[tokio::test]
    async fn test_get_for_viewer_hides_pending_from_others() {
        let pending =
            create_test_biodata("bd1", "user1", ApprovalStatus::Pending, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let result = service(db).get_for_viewer(Some("user2"), "bd1").await;

        assert!(matches!(result, Err(AppError::BiodataNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_for_viewer_owner_sees_own_pending() {
        let pending =
            create_test_biodata("bd1", "user1", ApprovalStatus::Pending, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let result = service(db).get_for_viewer(Some("user1"), "bd1").await.unwrap();

        assert_eq!(result.id, "bd1");
    }

    #[tokio::test]
    async fn test_get_for_viewer_hides_owner_deactivated() {
        let hidden = create_test_biodata(
            "bd1",
            "user1",
            ApprovalStatus::Approved,
            VisibilityStatus::Inactive,
        );

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[hidden]])
                .into_connection(),
        );

        let result = service(db).get_for_viewer(Some("user2"), "bd1").await;

        assert!(matches!(result, Err(AppError::BiodataNotFound(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_empty_age_range() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .search(BiodataSearchInput {
                min_age: Some(40),
                max_age: Some(25),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_unknown_kind() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let result = service(db)
            .search(BiodataSearchInput {
                kind: Some("alien".to_string()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_birth_date_bounds_exclude_age_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let (born_after, born_before) = birth_date_bounds(today, Some(20), Some(25));

        // At least 20: born on or before today - 20 years
        assert_eq!(born_before, NaiveDate::from_ymd_opt(2006, 8, 28));
        // At most 25: born strictly after today - 26 years, so a person
        // turning 26 exactly today is out of range
        assert_eq!(born_after, NaiveDate::from_ymd_opt(2000, 8, 29));
    }

    #[test]
    fn test_birth_date_bounds_without_ages() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        assert_eq!(birth_date_bounds(today, None, None), (None, None));
    }

    #[test]
    fn test_completed_sections_follow_section_order() {
        let model =
            create_test_biodata("bd1", "user1", ApprovalStatus::Pending, VisibilityStatus::Active);
        let mut active: biodata::ActiveModel = model.into();
        active.contact_phone = sea_orm::Set(Some("+8801700000000".to_string()));
        active.location = sea_orm::Set(Some("Dhaka".to_string()));

        let done = completed_sections(&active);

        // Order comes from SECTIONS, not from which field was set last
        assert_eq!(done, json!(["general", "location", "contact"]));
        for section in done.as_array().unwrap() {
            assert!(SECTIONS.contains(&section.as_str().unwrap()));
        }
    }

    #[tokio::test]
    async fn test_update_resets_approval_after_review() {
        let approved =
            create_test_biodata("bd1", "user1", ApprovalStatus::Approved, VisibilityStatus::Active);
        let mut resubmitted = approved.clone();
        resubmitted.approval_status = ApprovalStatus::Pending;
        resubmitted.about = Some("Updated about".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![approved], vec![resubmitted]])
                .into_connection(),
        );

        let result = service(db)
            .update(
                "user1",
                UpdateBiodataInput {
                    about: Some("Updated about".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result.approval_status, ApprovalStatus::Pending);
    }
}
