//! Pure forward-policy evaluation (no IO).
//!
//! Input: a crate model constructed elsewhere.
//! Output: findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod fingerprint;
pub mod model;
pub mod policy;

mod checks;
mod engine;

#[cfg(test)]
mod test_support;

pub use engine::{DomainReport, SeverityCounts, evaluate};
