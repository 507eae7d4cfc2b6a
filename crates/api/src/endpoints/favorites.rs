//! Favorite endpoints.

use axum::{extract::State, routing::post, Json, Router};
use milan_common::AppResult;
use milan_db::entities::favorite;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Favorite entry.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub biodata_id: String,
    pub created_at: String,
}

impl From<favorite::Model> for FavoriteResponse {
    fn from(model: favorite::Model) -> Self {
        Self {
            id: model.id,
            biodata_id: model.biodata_id,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Create favorite request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFavoriteRequest {
    pub biodata_id: String,
}

/// Add a biodata to favorites.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateFavoriteRequest>,
) -> AppResult<ApiResponse<FavoriteResponse>> {
    let model = state
        .favorite_service
        .create(&user.id, &req.biodata_id)
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Delete favorite request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFavoriteRequest {
    pub biodata_id: String,
}

/// Delete favorite response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFavoriteResponse {
    pub ok: bool,
}

/// Remove a biodata from favorites.
async fn delete(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteFavoriteRequest>,
) -> AppResult<ApiResponse<DeleteFavoriteResponse>> {
    state
        .favorite_service
        .delete(&user.id, &req.biodata_id)
        .await?;

    Ok(ApiResponse::ok(DeleteFavoriteResponse { ok: true }))
}

/// List favorites request.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritesRequest {
    pub limit: Option<u64>,
    pub until_id: Option<String>,
}

/// List own favorites, newest first.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListFavoritesRequest>,
) -> AppResult<ApiResponse<Vec<FavoriteResponse>>> {
    let models = state
        .favorite_service
        .list(&user.id, req.limit, req.until_id.as_deref())
        .await?;

    let favorites = models.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok(favorites))
}

/// Count favorites response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountFavoritesResponse {
    pub count: u64,
}

/// Count own favorites.
async fn count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<CountFavoritesResponse>> {
    let count = state.favorite_service.count(&user.id).await?;

    Ok(ApiResponse::ok(CountFavoritesResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/delete", post(delete))
        .route("/list", post(list))
        .route("/count", post(count))
}
