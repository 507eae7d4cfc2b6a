//! HTTP API layer for milan.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: accounts, biodata, browsing, favorites, admin review
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token auth, application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
