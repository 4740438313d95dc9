//! Moved to [`crate::domain::models::report`].

pub use crate::domain::models::report::Report;
