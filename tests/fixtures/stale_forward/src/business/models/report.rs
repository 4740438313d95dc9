pub use crate::domain::models::report::Report;
