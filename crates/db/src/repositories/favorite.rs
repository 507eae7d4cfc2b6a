//! Biodata favorite repository.

use std::sync::Arc;

use crate::entities::{favorite, Favorite};
use milan_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Favorite repository for database operations.
#[derive(Clone)]
pub struct FavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl FavoriteRepository {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a favorite by user and biodata.
    pub async fn find_by_user_and_biodata(
        &self,
        user_id: &str,
        biodata_id: &str,
    ) -> AppResult<Option<favorite::Model>> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::BiodataId.eq(biodata_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a biodata is favorited by user.
    pub async fn is_favorited(&self, user_id: &str, biodata_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_biodata(user_id, biodata_id)
            .await?
            .is_some())
    }

    /// Create a new favorite.
    pub async fn create(&self, model: favorite::ActiveModel) -> AppResult<favorite::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a favorite by user and biodata.
    pub async fn delete_by_user_and_biodata(
        &self,
        user_id: &str,
        biodata_id: &str,
    ) -> AppResult<()> {
        Favorite::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::BiodataId.eq(biodata_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get favorites by user (paginated, newest first).
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<favorite::Model>> {
        let mut query = Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::Id)
            .limit(limit);

        if let Some(until) = until_id {
            query = query.filter(favorite::Column::Id.lt(until));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count favorites for a user.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        Favorite::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
