//! Email records and reports for the database service.
//!
//! Models are defined under [`domain::models`]. The older `business::models`
//! paths stay importable through explicit, per-symbol re-exports, and every
//! one of them is registered in [`forwards`] so a model that moves again is
//! reported as [`ImportError::StaleForward`] instead of silently forking.

#![forbid(unsafe_code)]

pub mod business;
pub mod domain;
pub mod error;
pub mod forwards;

pub use domain::models::email_record::EmailRecord;
pub use domain::models::report::Report;
pub use error::{ImportError, ModelError};
