/// A stored email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailRecord {
    pub id: u64,
    pub subject: String,
}
