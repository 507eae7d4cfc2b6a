//! Owner-facing biodata endpoints.
//!
//! The owner always sees both stored statuses plus the derived pair, so the
//! client can render the status badge and enable the visibility switch
//! without re-deriving anything.

use axum::{extract::State, routing::post, Json, Router};
use milan_common::AppResult;
use milan_core::{BiodataService, CreateBiodataInput, UpdateBiodataInput};
use milan_db::entities::biodata;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Owner view of a biodata record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiodataResponse {
    pub id: String,
    pub kind: String,
    pub full_name: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub location: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub expected_partner: Option<String>,
    pub about: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub completed_sections: serde_json::Value,
    pub approval_status: String,
    pub visibility_status: String,
    pub effective_status: String,
    pub can_user_toggle: bool,
    pub review_note: Option<String>,
    pub created_at: String,
}

impl From<biodata::Model> for BiodataResponse {
    fn from(model: biodata::Model) -> Self {
        let derived = BiodataService::derived(&model);
        Self {
            id: model.id,
            kind: match model.kind {
                biodata::BiodataKind::Groom => "groom".to_string(),
                biodata::BiodataKind::Bride => "bride".to_string(),
            },
            full_name: model.full_name,
            date_of_birth: model.date_of_birth.to_string(),
            marital_status: model.marital_status,
            location: model.location,
            education: model.education,
            occupation: model.occupation,
            expected_partner: model.expected_partner,
            about: model.about,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            completed_sections: model.completed_sections,
            approval_status: model.approval_status.as_str().to_string(),
            visibility_status: model.visibility_status.as_str().to_string(),
            effective_status: derived.effective.as_str().to_string(),
            can_user_toggle: derived.can_user_toggle,
            review_note: model.review_note,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

/// Create biodata request (the first form step).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBiodataRequest {
    pub kind: String,
    pub full_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub marital_status: String,
}

/// Create a biodata.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateBiodataRequest>,
) -> AppResult<ApiResponse<BiodataResponse>> {
    let input = CreateBiodataInput {
        kind: req.kind,
        full_name: req.full_name,
        date_of_birth: req.date_of_birth,
        marital_status: req.marital_status,
    };

    let model = state.biodata_service.create(&user.id, input).await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Get own biodata.
async fn me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<BiodataResponse>> {
    let model = state.biodata_service.get_own(&user.id).await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Update own biodata (any subset of form sections).
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateBiodataInput>,
) -> AppResult<ApiResponse<BiodataResponse>> {
    let model = state.biodata_service.update(&user.id, input).await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Status response for the owner's status widget.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub approval_status: String,
    pub visibility_status: String,
    pub effective_status: String,
    pub can_user_toggle: bool,
}

impl From<biodata::Model> for StatusResponse {
    fn from(model: biodata::Model) -> Self {
        let derived = BiodataService::derived(&model);
        Self {
            approval_status: model.approval_status.as_str().to_string(),
            visibility_status: model.visibility_status.as_str().to_string(),
            effective_status: derived.effective.as_str().to_string(),
            can_user_toggle: derived.can_user_toggle,
        }
    }
}

/// Get own biodata status.
async fn status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StatusResponse>> {
    let model = state.biodata_service.get_own(&user.id).await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Toggle own biodata visibility.
async fn toggle_visibility(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StatusResponse>> {
    let model = state.biodata_service.toggle_visibility(&user.id).await?;

    Ok(ApiResponse::ok(model.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create))
        .route("/me", post(me))
        .route("/update", post(update))
        .route("/status", post(status))
        .route("/toggle-visibility", post(toggle_visibility))
}
