use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::document::{QuoteDocument, QuoteRenderer, RenderError};
use super::domain::{CareerApplication, ContactMessage, QuoteId, QuoteRequest, QuoteResult};
use super::engine::{PricingConfig, QuoteEngine};
use super::intake::{
    validate_career_application, validate_contact_message, validate_quote_request,
    IntakeViolation,
};
use super::notification::{career_notification, contact_notification, quote_notification};
use super::repository::{
    LeadNotifier, NotifyError, QuoteRecord, QuoteRepository, RepositoryError,
};

/// Service composing intake validation, the quote engine, persistence, and notification.
pub struct EstimateService<R, N> {
    engine: Arc<QuoteEngine>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

pub const DEFAULT_RECENT_QUOTES: usize = 20;
pub const MAX_RECENT_QUOTES: usize = 100;

static QUOTE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_quote_id() -> QuoteId {
    let id = QUOTE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    QuoteId(format!("quote-{id:06}"))
}

impl<R, N> EstimateService<R, N>
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: PricingConfig) -> Self {
        Self {
            engine: Arc::new(QuoteEngine::new(config)),
            repository,
            notifier,
        }
    }

    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Price a request without persisting it or notifying anyone.
    pub fn preview(&self, request: &QuoteRequest) -> Result<QuoteResult, EstimateServiceError> {
        validate_quote_request(request)?;
        Ok(self.engine.compute(request))
    }

    /// Validate, price, persist, and announce a quote request.
    ///
    /// The record is stored before the owner is notified. A notifier failure
    /// returns `Notify` with the quote already persisted, so a client retry
    /// stores a second record under a new id.
    pub fn submit_quote(&self, request: QuoteRequest) -> Result<QuoteRecord, EstimateServiceError> {
        validate_quote_request(&request)?;
        let result = self.engine.compute(&request);

        let QuoteRequest {
            contact,
            form_input,
        } = request;
        let record = QuoteRecord {
            quote_id: next_quote_id(),
            contact,
            form_input,
            result,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        self.notifier.notify(quote_notification(&stored))?;

        info!(
            quote_id = %stored.quote_id.0,
            segment = ?stored.result.segment,
            total_cents = stored.result.total_cents,
            "quote accepted"
        );
        Ok(stored)
    }

    /// Fetch a stored quote for API responses.
    pub fn get_quote(&self, quote_id: &QuoteId) -> Result<QuoteRecord, EstimateServiceError> {
        let record = self
            .repository
            .fetch(quote_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Newest quotes first; `limit` is clamped to `1..=MAX_RECENT_QUOTES`.
    pub fn recent_quotes(&self, limit: usize) -> Result<Vec<QuoteRecord>, EstimateServiceError> {
        let limit = limit.clamp(1, MAX_RECENT_QUOTES);
        Ok(self.repository.recent(limit)?)
    }

    pub fn quote_document(&self, quote_id: &QuoteId) -> Result<QuoteDocument, EstimateServiceError> {
        let record = self.get_quote(quote_id)?;
        Ok(QuoteDocument::from_record(&record))
    }

    pub fn render_quote(
        &self,
        quote_id: &QuoteId,
        renderer: &dyn QuoteRenderer,
    ) -> Result<Vec<u8>, EstimateServiceError> {
        let document = self.quote_document(quote_id)?;
        Ok(renderer.render(&document)?)
    }

    pub fn submit_contact(&self, message: ContactMessage) -> Result<(), EstimateServiceError> {
        validate_contact_message(&message)?;
        self.notifier.notify(contact_notification(&message))?;
        info!(subject = %message.subject.trim(), "contact message forwarded");
        Ok(())
    }

    pub fn submit_career(&self, application: CareerApplication) -> Result<(), EstimateServiceError> {
        validate_career_application(&application)?;
        self.notifier.notify(career_notification(&application))?;
        info!(position = %application.position.trim(), "career application forwarded");
        Ok(())
    }
}

/// Error raised by the estimate service.
#[derive(Debug, thiserror::Error)]
pub enum EstimateServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
