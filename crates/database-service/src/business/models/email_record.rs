//! Moved to [`crate::domain::models::email_record`].

pub use crate::domain::models::email_record::EmailRecord;
