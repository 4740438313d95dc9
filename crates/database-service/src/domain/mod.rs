//! Canonical home of the service's data types.

pub mod models;
