//! Admin moderation endpoints.
//!
//! Every handler checks the admin flag on the authenticated user before
//! touching the moderation service.

use axum::{extract::State, routing::post, Json, Router};
use milan_common::{AppError, AppResult};
use milan_core::BiodataService;
use milan_db::entities::{biodata, user};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

fn require_admin(user: &user::Model) -> AppResult<()> {
    if !user.is_admin {
        return Err(AppError::Forbidden("Admin privileges required".to_string()));
    }
    Ok(())
}

/// Review-queue view of a biodata record, including moderation fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBiodataResponse {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub location: Option<String>,
    pub completed_sections: serde_json::Value,
    pub approval_status: String,
    pub visibility_status: String,
    pub effective_status: String,
    pub reviewed_by: Option<String>,
    pub review_note: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

impl From<biodata::Model> for AdminBiodataResponse {
    fn from(model: biodata::Model) -> Self {
        let derived = BiodataService::derived(&model);
        Self {
            id: model.id,
            user_id: model.user_id,
            kind: match model.kind {
                biodata::BiodataKind::Groom => "groom".to_string(),
                biodata::BiodataKind::Bride => "bride".to_string(),
            },
            full_name: model.full_name,
            date_of_birth: model.date_of_birth.to_string(),
            marital_status: model.marital_status,
            location: model.location,
            completed_sections: model.completed_sections,
            approval_status: model.approval_status.as_str().to_string(),
            visibility_status: model.visibility_status.as_str().to_string(),
            effective_status: derived.effective.as_str().to_string(),
            reviewed_by: model.reviewed_by,
            review_note: model.review_note,
            reviewed_at: model.reviewed_at.map(|t| t.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// List biodatas request.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBiodataRequest {
    pub status: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// List biodatas for review, optionally filtered by approval status.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListBiodataRequest>,
) -> AppResult<ApiResponse<Vec<AdminBiodataResponse>>> {
    require_admin(&user)?;

    let status = req
        .status
        .as_deref()
        .map(biodata::ApprovalStatus::try_from)
        .transpose()?;
    let offset = req.offset.unwrap_or(0);

    let models = state
        .moderation_service
        .list(status, req.limit, offset)
        .await?;

    let biodatas = models.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok(biodatas))
}

/// Review verdict request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub biodata_id: String,
    pub note: Option<String>,
}

/// Approve a pending submission.
async fn approve(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AdminBiodataResponse>> {
    require_admin(&user)?;

    let model = state
        .moderation_service
        .approve(&user.id, &req.biodata_id, req.note.as_deref())
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Reject a pending submission.
async fn reject(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AdminBiodataResponse>> {
    require_admin(&user)?;

    let model = state
        .moderation_service
        .reject(&user.id, &req.biodata_id, req.note.as_deref())
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Deactivate an approved biodata.
async fn deactivate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> AppResult<ApiResponse<AdminBiodataResponse>> {
    require_admin(&user)?;

    let model = state
        .moderation_service
        .deactivate(&user.id, &req.biodata_id, req.note.as_deref())
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Reactivate request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactivateRequest {
    pub biodata_id: String,
}

/// Reactivate an admin-deactivated biodata.
async fn reactivate(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReactivateRequest>,
) -> AppResult<ApiResponse<AdminBiodataResponse>> {
    require_admin(&user)?;

    let model = state
        .moderation_service
        .reactivate(&user.id, &req.biodata_id)
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Pending count response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCountResponse {
    pub count: u64,
}

/// Count submissions awaiting review.
async fn pending_count(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<PendingCountResponse>> {
    require_admin(&user)?;

    let count = state.moderation_service.count_pending().await?;

    Ok(ApiResponse::ok(PendingCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/biodata/list", post(list))
        .route("/biodata/approve", post(approve))
        .route("/biodata/reject", post(reject))
        .route("/biodata/deactivate", post(deactivate))
        .route("/biodata/reactivate", post(reactivate))
        .route("/biodata/pending-count", post(pending_count))
}
