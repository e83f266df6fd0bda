use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use intake_processor::intake::{
    DeliveryError, DeliverySink, IntakeRequest, ProcessType, RecordStore, RequestId, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Record store backed by process memory. Stands in for the real document
/// store until that integration lands.
#[derive(Clone)]
pub(crate) struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<RequestId, IntakeRequest>>>,
    process_types: Arc<Vec<ProcessType>>,
}

impl InMemoryRecordStore {
    pub(crate) fn with_process_types(process_types: Vec<ProcessType>) -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            process_types: Arc::new(process_types),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create_record(&self, record: IntakeRequest) -> Result<IntakeRequest, StoreError> {
        let mut guard = self.records.lock().expect("record store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_active_process_types(&self) -> Result<Vec<ProcessType>, StoreError> {
        Ok(self
            .process_types
            .iter()
            .filter(|process_type| process_type.is_active)
            .cloned()
            .collect())
    }
}

/// Delivery sink that logs rendered notifications instead of sending them.
#[derive(Default, Clone)]
pub(crate) struct LoggingDeliverySink;

impl DeliverySink for LoggingDeliverySink {
    fn send(&self, subject: &str, body: &str) -> Result<(), DeliveryError> {
        // Body contents stay out of the logs; length only.
        info!(%subject, body_length = body.len(), "notification delivered to log sink");
        Ok(())
    }
}

/// Starter process type catalog used until an administrator-managed store is
/// wired in.
pub(crate) fn seed_process_types() -> Vec<ProcessType> {
    let catalog = [
        ("onboarding", "Onboarding", "New hire onboarding workflows"),
        ("offboarding", "Offboarding", "Departure and access revocation"),
        ("access-request", "Access Request", "System and facility access"),
        (
            "equipment-request",
            "Equipment Request",
            "Hardware procurement",
        ),
    ];

    catalog
        .into_iter()
        .map(|(id, name, description)| ProcessType {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            is_active: true,
        })
        .collect()
}
