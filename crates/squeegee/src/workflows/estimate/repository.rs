use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Breakdown, ContactInfo, FormInput, LineItem, QuoteId, QuoteResult, Segment,
};

/// Persisted quote: the request as received plus the computed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub quote_id: QuoteId,
    pub contact: ContactInfo,
    pub form_input: FormInput,
    pub result: QuoteResult,
    pub created_at: DateTime<Utc>,
}

impl QuoteRecord {
    pub fn receipt(&self) -> QuoteReceipt {
        QuoteReceipt {
            success: true,
            quote_id: self.quote_id.clone(),
            total: self.result.breakdown.total,
            total_cents: self.result.total_cents,
            breakdown: self.result.breakdown,
            segment: self.result.segment,
            line_items: self.result.line_items.clone(),
        }
    }
}

/// Storage abstraction keyed by the generated quote identifier.
pub trait QuoteRepository: Send + Sync {
    fn insert(&self, record: QuoteRecord) -> Result<QuoteRecord, RepositoryError>;
    fn fetch(&self, id: &QuoteId) -> Result<Option<QuoteRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<QuoteRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("quote already exists")]
    Conflict,
    #[error("quote not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (owner e-mail, chat webhook, log sink).
pub trait LeadNotifier: Send + Sync {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    Quote,
    Contact,
    Career,
}

/// Rendered message handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadNotification {
    pub kind: LeadKind,
    pub subject: String,
    pub reply_to: String,
    pub body: String,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Success payload returned to the website after a quote is accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReceipt {
    pub success: bool,
    pub quote_id: QuoteId,
    pub total: u64,
    pub total_cents: u64,
    pub breakdown: Breakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    pub line_items: Vec<LineItem>,
}
