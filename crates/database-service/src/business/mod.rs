//! Legacy module layout, kept so existing `business::models` imports resolve.
//!
//! Nothing is defined here. Each legacy module re-exports the canonical type
//! by name; see [`crate::forwards`] for the registry that verifies them.

pub mod models;
