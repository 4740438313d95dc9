use super::email_record::EmailRecord;

#[derive(Clone, Debug, Default)]
pub struct Report {
    pub title: String,
    pub records: Vec<EmailRecord>,
}
