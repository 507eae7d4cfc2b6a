//! Public profile browsing endpoints.
//!
//! These views never expose moderation internals; a profile that is not
//! discoverable reads as not found for everyone but its owner.

use axum::{extract::State, routing::post, Json, Router};
use milan_common::AppResult;
use milan_core::BiodataSearchInput;
use milan_db::entities::biodata;
use serde::{Deserialize, Serialize};

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// Public view of a biodata record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub kind: String,
    pub full_name: String,
    pub age: i32,
    pub marital_status: String,
    pub location: Option<String>,
    pub education: Option<String>,
    pub occupation: Option<String>,
    pub expected_partner: Option<String>,
    pub about: Option<String>,
}

impl From<biodata::Model> for ProfileResponse {
    fn from(model: biodata::Model) -> Self {
        Self {
            id: model.id,
            kind: match model.kind {
                biodata::BiodataKind::Groom => "groom".to_string(),
                biodata::BiodataKind::Bride => "bride".to_string(),
            },
            full_name: model.full_name,
            age: age_years(model.date_of_birth),
            marital_status: model.marital_status,
            location: model.location,
            education: model.education,
            occupation: model.occupation,
            expected_partner: model.expected_partner,
            about: model.about,
        }
    }
}

/// Whole years between the date of birth and today.
fn age_years(date_of_birth: chrono::NaiveDate) -> i32 {
    let today = chrono::Utc::now().date_naive();
    let mut age = today.years_since(date_of_birth).unwrap_or(0);
    // years_since saturates at zero for future dates; keep that behavior
    if age > i32::MAX as u32 {
        age = 0;
    }
    age as i32
}

/// Show profile request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProfileRequest {
    pub biodata_id: String,
}

/// Show a single profile.
async fn show(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowProfileRequest>,
) -> AppResult<ApiResponse<ProfileResponse>> {
    let viewer_id = viewer.as_ref().map(|u| u.id.as_str());
    let model = state
        .biodata_service
        .get_for_viewer(viewer_id, &req.biodata_id)
        .await?;

    Ok(ApiResponse::ok(model.into()))
}

/// Browse/search discoverable profiles.
async fn search(
    State(state): State<AppState>,
    Json(input): Json<BiodataSearchInput>,
) -> AppResult<ApiResponse<Vec<ProfileResponse>>> {
    let models = state.biodata_service.search(input).await?;

    let profiles = models.into_iter().map(Into::into).collect();

    Ok(ApiResponse::ok(profiles))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/show", post(show))
        .route("/search", post(search))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_age_years() {
        let today = chrono::Utc::now().date_naive();
        let dob = NaiveDate::from_ymd_opt(today.year() - 30, 1, 1).unwrap();
        let age = age_years(dob);
        assert!(age == 30 || age == 29); // depends on today's month/day
    }

    #[test]
    fn test_age_years_future_dob_is_zero() {
        let today = chrono::Utc::now().date_naive();
        let dob = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap();
        assert_eq!(age_years(dob), 0);
    }
}
