pub use crate::EmailRecord;
