use super::email_record::EmailRecord;
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Summary over a batch of email records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReportFields")]
pub struct Report {
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Record ids in input order.
    pub record_ids: Vec<u64>,
    pub sender_counts: BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct ReportFields {
    title: String,
    #[serde(with = "time::serde::rfc3339")]
    generated_at: OffsetDateTime,
    record_ids: Vec<u64>,
    sender_counts: BTreeMap<String, usize>,
}

impl TryFrom<ReportFields> for Report {
    type Error = ModelError;

    fn try_from(f: ReportFields) -> Result<Self, Self::Error> {
        check_title(&f.title)?;
        Ok(Self {
            title: f.title,
            generated_at: f.generated_at,
            record_ids: f.record_ids,
            sender_counts: f.sender_counts,
        })
    }
}

fn check_title(title: &str) -> Result<(), ModelError> {
    if title.trim().is_empty() {
        return Err(ModelError::EmptyField("title"));
    }
    Ok(())
}

impl Report {
    pub fn from_records(
        title: impl Into<String>,
        records: &[EmailRecord],
        generated_at: OffsetDateTime,
    ) -> Result<Self, ModelError> {
        let title = title.into();
        check_title(&title)?;

        let mut sender_counts = BTreeMap::new();
        for r in records {
            *sender_counts.entry(r.sender.clone()).or_insert(0) += 1;
        }

        Ok(Self {
            title,
            generated_at,
            record_ids: records.iter().map(|r| r.id).collect(),
            sender_counts,
        })
    }

    pub fn total_records(&self) -> usize {
        self.record_ids.len()
    }
}
