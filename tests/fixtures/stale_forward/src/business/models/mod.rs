//! Legacy model paths.

pub mod email_record;
pub mod report;
