//! Biodata moderation service for the admin review workflow.
//!
//! Admins own [`ApprovalStatus`]. Approve and reject act on pending
//! submissions; deactivate and reactivate move a record between the
//! approved and admin-inactive states. The owner's visibility preference is
//! never touched here, so an approval restores whatever discoverability the
//! owner last chose.

use milan_common::{AppError, AppResult, Config};
use milan_db::{
    entities::biodata::{self, ApprovalStatus},
    repositories::BiodataRepository,
};
use sea_orm::Set;

/// Moderation service for reviewing biodata submissions.
#[derive(Clone)]
pub struct ModerationService {
    biodata_repo: BiodataRepository,
    max_list_limit: u64,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub fn new(biodata_repo: BiodataRepository, config: &Config) -> Self {
        Self {
            biodata_repo,
            max_list_limit: config.moderation.max_search_limit,
        }
    }

    /// List biodatas for the review queue, optionally filtered by approval
    /// status, capped by the configured limit.
    pub async fn list(
        &self,
        status: Option<ApprovalStatus>,
        limit: Option<u64>,
        offset: u64,
    ) -> AppResult<Vec<biodata::Model>> {
        let limit = super::page_limit(limit, self.max_list_limit);
        self.biodata_repo.list_by_approval(status, limit, offset).await
    }

    /// Approve a pending submission.
    pub async fn approve(
        &self,
        reviewer_id: &str,
        biodata_id: &str,
        note: Option<&str>,
    ) -> AppResult<biodata::Model> {
        self.review(reviewer_id, biodata_id, note, ApprovalStatus::Approved)
            .await
    }

    /// Reject a pending submission.
    pub async fn reject(
        &self,
        reviewer_id: &str,
        biodata_id: &str,
        note: Option<&str>,
    ) -> AppResult<biodata::Model> {
        self.review(reviewer_id, biodata_id, note, ApprovalStatus::Rejected)
            .await
    }

    async fn review(
        &self,
        reviewer_id: &str,
        biodata_id: &str,
        note: Option<&str>,
        verdict: ApprovalStatus,
    ) -> AppResult<biodata::Model> {
        let biodata = self.biodata_repo.get_by_id(biodata_id).await?;

        if biodata.approval_status != ApprovalStatus::Pending {
            return Err(AppError::BadRequest(
                "Biodata already reviewed".to_string(),
            ));
        }

        tracing::info!(
            biodata_id = %biodata_id,
            reviewer_id = %reviewer_id,
            verdict = verdict.as_str(),
            "Reviewing biodata submission"
        );

        let now = chrono::Utc::now();
        let mut active: biodata::ActiveModel = biodata.into();
        active.approval_status = Set(verdict);
        active.reviewed_by = Set(Some(reviewer_id.to_string()));
        active.review_note = Set(note.map(String::from));
        active.reviewed_at = Set(Some(now.into()));
        active.updated_at = Set(Some(now.into()));

        self.biodata_repo.update(active).await
    }

    /// Deactivate an approved biodata (admin takes it off the platform).
    pub async fn deactivate(
        &self,
        reviewer_id: &str,
        biodata_id: &str,
        note: Option<&str>,
    ) -> AppResult<biodata::Model> {
        let biodata = self.biodata_repo.get_by_id(biodata_id).await?;

        if biodata.approval_status != ApprovalStatus::Approved {
            return Err(AppError::BadRequest(
                "Only approved biodatas can be deactivated".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let mut active: biodata::ActiveModel = biodata.into();
        active.approval_status = Set(ApprovalStatus::Inactive);
        active.reviewed_by = Set(Some(reviewer_id.to_string()));
        active.review_note = Set(note.map(String::from));
        active.reviewed_at = Set(Some(now.into()));
        active.updated_at = Set(Some(now.into()));

        self.biodata_repo.update(active).await
    }

    /// Reactivate an admin-deactivated biodata back to approved.
    pub async fn reactivate(
        &self,
        reviewer_id: &str,
        biodata_id: &str,
    ) -> AppResult<biodata::Model> {
        let biodata = self.biodata_repo.get_by_id(biodata_id).await?;

        if biodata.approval_status != ApprovalStatus::Inactive {
            return Err(AppError::BadRequest(
                "Only deactivated biodatas can be reactivated".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let mut active: biodata::ActiveModel = biodata.into();
        active.approval_status = Set(ApprovalStatus::Approved);
        active.reviewed_by = Set(Some(reviewer_id.to_string()));
        active.reviewed_at = Set(Some(now.into()));
        active.updated_at = Set(Some(now.into()));

        self.biodata_repo.update(active).await
    }

    /// Count submissions awaiting review.
    pub async fn count_pending(&self) -> AppResult<u64> {
        self.biodata_repo
            .count_by_approval(ApprovalStatus::Pending)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use milan_common::config::{DatabaseConfig, ModerationConfig, ServerConfig};
    use milan_db::entities::biodata::{BiodataKind, VisibilityStatus};
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
        approval: ApprovalStatus,
        visibility: VisibilityStatus,
    ) -> biodata::Model {
        biodata::Model {
            id: id.to_string(),
            user_id: "user1".to_string(),
            kind: BiodataKind::Groom,
            full_name: "Test Person".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1993, 11, 5).unwrap(),
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

    #[tokio::test]
    async fn test_approve_pending() {
        let pending =
            create_test_biodata("bd1", ApprovalStatus::Pending, VisibilityStatus::Active);
        let mut approved = pending.clone();
        approved.approval_status = ApprovalStatus::Approved;
        approved.reviewed_by = Some("admin1".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![pending], vec![approved]])
                .into_connection(),
        );

        let service = ModerationService::new(BiodataRepository::new(db), &test_config());
        let result = service.approve("admin1", "bd1", None).await.unwrap();

        assert_eq!(result.approval_status, ApprovalStatus::Approved);
        assert_eq!(result.reviewed_by.as_deref(), Some("admin1"));
    }

    #[tokio::test]
    async fn test_approve_already_reviewed() {
        let approved =
            create_test_biodata("bd1", ApprovalStatus::Approved, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[approved]])
                .into_connection(),
        );

        let service = ModerationService::new(BiodataRepository::new(db), &test_config());
        let result = service.approve("admin1", "bd1", None).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reject_keeps_owner_visibility() {
        let pending =
            create_test_biodata("bd1", ApprovalStatus::Pending, VisibilityStatus::Inactive);
        let mut rejected = pending.clone();
        rejected.approval_status = ApprovalStatus::Rejected;
        rejected.review_note = Some("Incomplete photos".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![pending], vec![rejected]])
                .into_connection(),
        );

        let service = ModerationService::new(BiodataRepository::new(db), &test_config());
        let result = service
            .reject("admin1", "bd1", Some("Incomplete photos"))
            .await
            .unwrap();

        assert_eq!(result.approval_status, ApprovalStatus::Rejected);
        // Owner preference survives the verdict
        assert_eq!(result.visibility_status, VisibilityStatus::Inactive);
    }

    #[tokio::test]
    async fn test_deactivate_requires_approved() {
        let pending =
            create_test_biodata("bd1", ApprovalStatus::Pending, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .into_connection(),
        );

        let service = ModerationService::new(BiodataRepository::new(db), &test_config());
        let result = service.deactivate("admin1", "bd1", None).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_reactivate_requires_inactive() {
        let rejected =
            create_test_biodata("bd1", ApprovalStatus::Rejected, VisibilityStatus::Active);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[rejected]])
                .into_connection(),
        );

        let service = ModerationService::new(BiodataRepository::new(db), &test_config());
        let result = service.reactivate("admin1", "bd1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
