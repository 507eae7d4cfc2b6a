//! Biodata favorite service.

use milan_common::{AppError, AppResult, Config, IdGenerator};
use milan_db::{
    entities::favorite,
    repositories::{BiodataRepository, FavoriteRepository},
};
use sea_orm::Set;

use crate::status::EffectiveStatus;

/// Favorite service for managing saved biodatas.
#[derive(Clone)]
pub struct FavoriteService {
    favorite_repo: FavoriteRepository,
    biodata_repo: BiodataRepository,
    id_gen: IdGenerator,
    max_list_limit: u64,
}

impl FavoriteService {
    /// Create a new favorite service.
    #[must_use]
    pub fn new(
        favorite_repo: FavoriteRepository,
        biodata_repo: BiodataRepository,
        config: &Config,
    ) -> Self {
        Self {
            favorite_repo,
            biodata_repo,
            id_gen: IdGenerator::new(),
            max_list_limit: config.moderation.max_search_limit,
        }
    }

    /// Add a biodata to favorites.
    ///
    /// Only discoverable biodatas can be favorited; hidden ones read as not
    /// found so the caller cannot probe moderation state.
    pub async fn create(&self, user_id: &str, biodata_id: &str) -> AppResult<favorite::Model> {
        let biodata = self.biodata_repo.get_by_id(biodata_id).await?;

        if biodata.user_id == user_id {
            return Err(AppError::BadRequest(
                "Cannot favorite your own biodata".to_string(),
            ));
        }

        let derived = super::BiodataService::derived(&biodata);
        if derived.effective != EffectiveStatus::Active {
            return Err(AppError::BiodataNotFound(biodata_id.to_string()));
        }

        if self.favorite_repo.is_favorited(user_id, biodata_id).await? {
            return Err(AppError::BadRequest(
                "Biodata already favorited".to_string(),
            ));
        }

        let model = favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            biodata_id: Set(biodata_id.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.favorite_repo.create(model).await
    }

    /// Remove a biodata from favorites.
    pub async fn delete(&self, user_id: &str, biodata_id: &str) -> AppResult<()> {
        if !self.favorite_repo.is_favorited(user_id, biodata_id).await? {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        self.favorite_repo
            .delete_by_user_and_biodata(user_id, biodata_id)
            .await
    }

    /// Check if a biodata is favorited by user.
    pub async fn is_favorited(&self, user_id: &str, biodata_id: &str) -> AppResult<bool> {
        self.favorite_repo.is_favorited(user_id, biodata_id).await
    }

    /// Get user's favorites (paginated, capped by the configured limit).
    pub async fn list(
        &self,
        user_id: &str,
        limit: Option<u64>,
        until_id: Option<&str>,
    ) -> AppResult<Vec<favorite::Model>> {
        let limit = super::page_limit(limit, self.max_list_limit);
        self.favorite_repo.find_by_user(user_id, limit, until_id).await
    }

    /// Count user's favorites.
    pub async fn count(&self, user_id: &str) -> AppResult<u64> {
        self.favorite_repo.count_by_user(user_id).await
    }
}
