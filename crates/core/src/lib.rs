//! Core business logic for milan.

pub mod services;
pub mod status;

pub use services::*;
pub use status::{derive_status, DerivedStatus, EffectiveStatus};
