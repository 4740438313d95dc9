pub mod business;
pub mod domain;

pub use domain::models::email_record::EmailRecord;
pub use domain::models::report::Report;
