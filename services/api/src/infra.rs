use metrics_exporter_prometheus::PrometheusHandle;
use squeegee::config::NotificationConfig;
use squeegee::workflows::estimate::{
    LeadNotification, LeadNotifier, NotifyError, QuoteId, QuoteRecord, QuoteRepository,
    RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryQuoteRepository {
    records: Arc<Mutex<HashMap<QuoteId, QuoteRecord>>>,
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn insert(&self, record: QuoteRecord) -> Result<QuoteRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.quote_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.quote_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &QuoteId) -> Result<Option<QuoteRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<QuoteRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.quote_id.cmp(&a.quote_id))
        });
        records.truncate(limit);
        Ok(records)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

/// Records every owner notification and logs it; mail delivery is handled outside this process.
#[derive(Clone)]
pub(crate) struct LoggingNotifier {
    config: NotificationConfig,
    outbox: Arc<Mutex<Vec<LeadNotification>>>,
}

impl LoggingNotifier {
    pub(crate) fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            outbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    #[cfg(test)]
    pub(crate) fn outbox(&self) -> Vec<LeadNotification> {
        self.outbox
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl LeadNotifier for LoggingNotifier {
    fn notify(&self, notification: LeadNotification) -> Result<(), NotifyError> {
        match (&self.config.notify_email, &self.config.smtp_host) {
            (Some(recipient), Some(smtp_host)) => info!(
                kind = ?notification.kind,
                subject = %notification.subject,
                reply_to = %notification.reply_to,
                %recipient,
                %smtp_host,
                "owner notification queued"
            ),
            _ => warn!(
                kind = ?notification.kind,
                subject = %notification.subject,
                "notification transport not configured; would send:\n{}",
                notification.body
            ),
        }

        self.outbox
            .lock()
            .map_err(|_| NotifyError::Transport("outbox mutex poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use squeegee::workflows::estimate::{
        ContactInfo, FormInput, LeadKind, PricingConfig, QuoteEngine, QuoteRequest,
    };

    fn record(id: &str, minute: u32) -> QuoteRecord {
        let request = QuoteRequest {
            contact: ContactInfo {
                email: "lee@example.com".to_string(),
                ..ContactInfo::default()
            },
            form_input: FormInput {
                property_type: Some("Townhouse".to_string()),
                window_count: 3,
                ..FormInput::default()
            },
        };
        let result = QuoteEngine::new(PricingConfig::current()).compute(&request);
        QuoteRecord {
            quote_id: QuoteId(id.to_string()),
            contact: request.contact,
            form_input: request.form_input,
            result,
            created_at: Utc
                .with_ymd_and_hms(2025, 4, 1, 9, minute, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn repository_rejects_duplicate_ids() {
        let repository = InMemoryQuoteRepository::default();
        repository.insert(record("quote-000001", 0)).expect("first insert");

        assert!(matches!(
            repository.insert(record("quote-000001", 1)),
            Err(RepositoryError::Conflict)
        ));
    }

    #[test]
    fn recent_returns_newest_first() {
        let repository = InMemoryQuoteRepository::default();
        for (id, minute) in [("quote-000001", 0), ("quote-000002", 5), ("quote-000003", 3)] {
            repository.insert(record(id, minute)).expect("insert");
        }

        let recent = repository.recent(2).expect("listing");
        let ids: Vec<_> = recent.iter().map(|record| record.quote_id.0.as_str()).collect();
        assert_eq!(ids, vec!["quote-000002", "quote-000003"]);
    }

    #[test]
    fn notifier_records_messages_without_transport() {
        let notifier = LoggingNotifier::new(NotificationConfig::default());
        notifier
            .notify(LeadNotification {
                kind: LeadKind::Contact,
                subject: "Contact form: Hello".to_string(),
                reply_to: "lee@example.com".to_string(),
                body: "Hello there".to_string(),
            })
            .expect("logged");

        let outbox = notifier.outbox();
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].kind, LeadKind::Contact);
    }
}
