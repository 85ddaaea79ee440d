//! Free-estimate intake: the quote engine plus the thin service and HTTP layer around it.

pub mod document;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod notification;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use document::{PlainTextRenderer, QuoteDocument, QuoteRenderer, RenderError};
pub use domain::{
    Breakdown, CareerApplication, ContactInfo, ContactMessage, FormInput, LineItem, QuoteId,
    QuoteRequest, QuoteResult, Segment,
};
pub use engine::{
    classify_segment, price_quote, PricedQuote, PricingConfig, PricingProfile, QuoteEngine,
    RateKind, RateSelection,
};
pub use intake::IntakeViolation;
pub use repository::{
    LeadKind, LeadNotification, LeadNotifier, NotifyError, QuoteReceipt, QuoteRecord,
    QuoteRepository, RepositoryError,
};
pub use router::estimate_router;
pub use service::{EstimateService, EstimateServiceError};
