//! Biodata repository.

use std::sync::Arc;

use crate::entities::{
    biodata::{self, ApprovalStatus, BiodataKind, VisibilityStatus},
    Biodata,
};
use milan_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Filters for browsing discoverable biodatas.
///
/// Age filters are expressed as date-of-birth bounds; callers convert
/// requested ages to dates so the repository stays a thin query layer.
#[derive(Debug, Clone, Default)]
pub struct BiodataFilter {
    /// Groom or bride profiles only.
    pub kind: Option<BiodataKind>,
    /// Exact marital status match.
    pub marital_status: Option<String>,
    /// Substring match on location.
    pub location: Option<String>,
    /// Only records with `date_of_birth >= born_after` (upper age bound).
    pub born_after: Option<chrono::NaiveDate>,
    /// Only records with `date_of_birth <= born_before` (lower age bound).
    pub born_before: Option<chrono::NaiveDate>,
}

/// Biodata repository for database operations.
#[derive(Clone)]
pub struct BiodataRepository {
    db: Arc<DatabaseConnection>,
}

impl BiodataRepository {
    /// Create a new biodata repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a biodata by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<biodata::Model>> {
        Biodata::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a biodata by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<biodata::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BiodataNotFound(id.to_string()))
    }

    /// Find the biodata owned by a user.
    pub async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<biodata::Model>> {
        Biodata::find()
            .filter(biodata::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the biodata owned by a user, returning an error if not found.
    pub async fn get_by_user_id(&self, user_id: &str) -> AppResult<biodata::Model> {
        self.find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::BiodataNotFound(user_id.to_string()))
    }

    /// Create a new biodata.
    pub async fn create(&self, model: biodata::ActiveModel) -> AppResult<biodata::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a biodata.
    pub async fn update(&self, model: biodata::ActiveModel) -> AppResult<biodata::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Browse discoverable biodatas (approved and owner-visible), newest
    /// first, keyset-paginated by ID.
    pub async fn find_discoverable(
        &self,
        filter: &BiodataFilter,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<biodata::Model>> {
        let mut query = Biodata::find()
            .filter(biodata::Column::ApprovalStatus.eq(ApprovalStatus::Approved))
            .filter(biodata::Column::VisibilityStatus.eq(VisibilityStatus::Active))
            .order_by_desc(biodata::Column::Id)
            .limit(limit);

        if let Some(kind) = filter.kind {
            query = query.filter(biodata::Column::Kind.eq(kind));
        }
        if let Some(ref marital) = filter.marital_status {
            query = query.filter(biodata::Column::MaritalStatus.eq(marital.clone()));
        }
        if let Some(ref location) = filter.location {
            query = query.filter(biodata::Column::Location.contains(location.clone()));
        }
        if let Some(born_after) = filter.born_after {
            query = query.filter(biodata::Column::DateOfBirth.gte(born_after));
        }
        if let Some(born_before) = filter.born_before {
            query = query.filter(biodata::Column::DateOfBirth.lte(born_before));
        }
        if let Some(until) = until_id {
            query = query.filter(biodata::Column::Id.lt(until));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List biodatas for the review queue, optionally filtered by approval
    /// status, newest first.
    pub async fn list_by_approval(
        &self,
        status: Option<ApprovalStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<biodata::Model>> {
        let mut query = Biodata::find().order_by_desc(biodata::Column::CreatedAt);

        if let Some(s) = status {
            query = query.filter(biodata::Column::ApprovalStatus.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count biodatas with the given approval status.
    pub async fn count_by_approval(&self, status: ApprovalStatus) -> AppResult<u64> {
        Biodata::find()
            .filter(biodata::Column::ApprovalStatus.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn create_test_biodata(id: &str, user_id: &str) -> biodata::Model {
        biodata::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind: BiodataKind::Groom,
            full_name: "Test Person".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 3, 14).unwrap(),
            marital_status: "never_married".to_string(),
            location: Some("Dhaka".to_string()),
            education: None,
            occupation: None,
            expected_partner: None,
            about: None,
            contact_email: None,
            contact_phone: None,
            completed_sections: json!(["general"]),
            approval_status: ApprovalStatus::Approved,
            visibility_status: VisibilityStatus::Active,
            reviewed_by: None,
            review_note: None,
            reviewed_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let biodata = create_test_biodata("bd1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[biodata]])
                .into_connection(),
        );

        let repo = BiodataRepository::new(db);
        let result = repo.find_by_user_id("user1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().id, "bd1");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<biodata::Model>::new()])
                .into_connection(),
        );

        let repo = BiodataRepository::new(db);
        let result = repo.get_by_id("missing").await;

        assert!(matches!(result, Err(AppError::BiodataNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_discoverable_with_filters() {
        let biodata = create_test_biodata("bd1", "user1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[biodata]])
                .into_connection(),
        );

        let repo = BiodataRepository::new(db);
        let filter = BiodataFilter {
            kind: Some(BiodataKind::Groom),
            location: Some("Dhaka".to_string()),
            ..Default::default()
        };
        let result = repo.find_discoverable(&filter, 10, None).await.unwrap();

        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_list_by_approval() {
        let bd1 = create_test_biodata("bd1", "user1");
        let bd2 = create_test_biodata("bd2", "user2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[bd1, bd2]])
                .into_connection(),
        );

        let repo = BiodataRepository::new(db);
        let result = repo
            .list_by_approval(Some(ApprovalStatus::Approved), 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }
}
