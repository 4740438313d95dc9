pub use crate::domain::models::email_record::*;
