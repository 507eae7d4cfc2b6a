//! API endpoints.

mod admin;
mod auth;
mod biodata;
mod favorites;
mod profiles;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/biodata", biodata::router())
        .nest("/profiles", profiles::router())
        .nest("/favorites", favorites::router())
        .nest("/admin", admin::router())
}
