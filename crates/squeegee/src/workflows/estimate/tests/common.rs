use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::estimate::domain::{
    CareerApplication, ContactInfo, ContactMessage, FormInput, QuoteId, QuoteRequest,
};
use crate::workflows::estimate::engine::PricingConfig;
use crate::workflows::estimate::repository::{
    LeadNotification, LeadNotifier, NotifyError, QuoteRecord, QuoteRepository, RepositoryError,
};
use crate::workflows::estimate::service::EstimateService;

pub(super) fn contact() -> ContactInfo {
    ContactInfo {
        first_name: "Morgan".to_string(),
        last_name: "Reyes".to_string(),
        email: "morgan@example.com".to_string(),
        phone: Some("540-555-0101".to_string()),
        address: Some("12 Loudoun St".to_string()),
        city: Some("Leesburg".to_string()),
        zip_code: Some("20175".to_string()),
    }
}

pub(super) fn commercial_form(tier: &str, panes: u32, services: &[&str]) -> FormInput {
    FormInput {
        property_type: Some("Commercial".to_string()),
        service_type: Some(tier.to_string()),
        window_count: panes,
        additional_services: services.iter().map(|tag| tag.to_string()).collect(),
        ..FormInput::default()
    }
}

pub(super) fn residential_form(mode: &str, windows: u32, screens: u32, stories: &str) -> FormInput {
    FormInput {
        property_type: Some("Single Family Home".to_string()),
        service_type: Some(mode.to_string()),
        window_count: windows,
        screen_count: screens,
        stories: Some(stories.to_string()),
        ..FormInput::default()
    }
}

pub(super) fn quote_request(form_input: FormInput) -> QuoteRequest {
    QuoteRequest {
        contact: contact(),
        form_input,
    }
}

pub(super) fn contact_message() -> ContactMessage {
    ContactMessage {
        name: "Morgan Reyes".to_string(),
        email: "morgan@example.com".to_string(),
        phone: None,
        subject: "Gutter cleaning".to_string(),
        message: "Do you also clean gutters?".to_string(),
    }
}

pub(super) fn career_application() -> CareerApplication {
    CareerApplication {
        name: "Sam Ito".to_string(),
        email: "sam@example.com".to_string(),
        phone: "540-555-0199".to_string(),
        position: "Window Technician".to_string(),
        experience: Some("2 years".to_string()),
        availability: Some("Weekdays".to_string()),
        message: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<QuoteId, QuoteRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl QuoteRepository for MemoryRepository {
    fn insert(&self, record: QuoteRecord) -> Result<QuoteRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.quote_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.quote_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &QuoteId) -> Result<Option<QuoteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<QuoteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.quote_id.cmp(&a.quote_id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl QuoteRepository for UnavailableRepository {
    fn insert(&self, _record: QuoteRecord) -> Result<QuoteRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &QuoteId) -> Result<Option<QuoteRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<QuoteRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    sent: Arc<Mutex<Vec<LeadNotification>>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<LeadNotification> {
        self.sent.lock().expect("lock").clone()
    }
}

impl LeadNotifier for MemoryNotifier {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotifyError> {
        self.sent.lock().expect("lock").push(notification);
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl LeadNotifier for FailingNotifier {
    fn notify(&self, _notification: LeadNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (
    EstimateService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = EstimateService::new(
        repository.clone(),
        notifier.clone(),
        PricingConfig::current(),
    );
    (service, repository, notifier)
}

pub(super) async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
