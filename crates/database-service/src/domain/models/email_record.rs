use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One stored email message.
///
/// Deserializing runs the same validation as [`EmailRecord::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmailRecordFields")]
pub struct EmailRecord {
    pub id: u64,
    /// RFC 5322 `Message-ID`, unique per message.
    pub message_id: String,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
}

/// Wire shape of [`EmailRecord`] before validation.
#[derive(Deserialize)]
struct EmailRecordFields {
    id: u64,
    message_id: String,
    sender: String,
    recipients: Vec<String>,
    subject: String,
    #[serde(with = "time::serde::rfc3339")]
    received_at: OffsetDateTime,
}

impl TryFrom<EmailRecordFields> for EmailRecord {
    type Error = ModelError;

    fn try_from(f: EmailRecordFields) -> Result<Self, Self::Error> {
        Self::new(
            f.id,
            f.message_id,
            f.sender,
            f.recipients,
            f.subject,
            f.received_at,
        )
    }
}

impl EmailRecord {
    pub fn new(
        id: u64,
        message_id: impl Into<String>,
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        received_at: OffsetDateTime,
    ) -> Result<Self, ModelError> {
        let message_id = message_id.into();
        if message_id.trim().is_empty() {
            return Err(ModelError::EmptyField("message_id"));
        }
        let sender = sender.into();
        check_address(&sender)?;
        if recipients.is_empty() {
            return Err(ModelError::NoRecipients);
        }
        for r in &recipients {
            check_address(r)?;
        }

        Ok(Self {
            id,
            message_id,
            sender,
            recipients,
            subject: subject.into(),
            received_at,
        })
    }

    /// Domain part of the sender address, lowercased.
    pub fn sender_domain(&self) -> String {
        self.sender
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

fn check_address(address: &str) -> Result<(), ModelError> {
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::InvalidAddress(address.to_string())),
    }
}
