use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::intake::domain::{IntakeRequest, IntakeSubmission, ProcessType, RequestId};
use crate::intake::store::{DeliveryError, DeliverySink, RecordStore, StoreError};

/// Reference day used by clock-injected validation tests.
pub(super) fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).expect("valid reference date")
}

pub(super) fn process_types() -> Vec<ProcessType> {
    vec![
        ProcessType {
            id: "pt-onboarding".to_string(),
            name: "Onboarding".to_string(),
            description: Some("New hire onboarding".to_string()),
            is_active: true,
        },
        ProcessType {
            id: "pt-offboarding".to_string(),
            name: "Offboarding".to_string(),
            description: None,
            is_active: true,
        },
        ProcessType {
            id: "pt-legacy".to_string(),
            name: "Legacy Migration".to_string(),
            description: None,
            is_active: false,
        },
    ]
}

pub(super) fn valid_submission() -> IntakeSubmission {
    IntakeSubmission {
        requestor_name: "Dana Field".to_string(),
        requestor_email: "dana.field@example.com".to_string(),
        job_title: "Operations Lead".to_string(),
        process_requested: "Onboarding".to_string(),
        required_completion_date: Some(Utc::now().date_naive() + chrono::Duration::days(7)),
        comments: None,
    }
}

pub(super) fn valid_record(id: &str) -> IntakeRequest {
    IntakeRequest {
        id: RequestId(id.to_string()),
        requestor_name: "Dana Field".to_string(),
        requestor_email: "dana.field@example.com".to_string(),
        job_title: "Operations Lead".to_string(),
        process_requested: "Onboarding".to_string(),
        required_completion_date: Some(Utc::now().date_naive() + chrono::Duration::days(7)),
        comments: None,
        created_date: Utc::now(),
        status: "Pending".to_string(),
    }
}

/// Store double with togglable failure modes and a fetch counter so cache
/// behavior can be observed.
pub(super) struct MemoryStore {
    pub(super) records: Mutex<HashMap<RequestId, IntakeRequest>>,
    pub(super) process_types: Mutex<Vec<ProcessType>>,
    pub(super) list_calls: AtomicUsize,
    pub(super) fail_listing: AtomicBool,
    pub(super) fail_create: AtomicBool,
}

impl MemoryStore {
    pub(super) fn new(types: Vec<ProcessType>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            process_types: Mutex::new(types),
            list_calls: AtomicUsize::new(0),
            fail_listing: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
        }
    }

    pub(super) fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(super) fn replace_process_types(&self, types: Vec<ProcessType>) {
        *self.process_types.lock().expect("type mutex poisoned") = types;
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(process_types())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create_record(&self, record: IntakeRequest) -> Result<IntakeRequest, StoreError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        let mut guard = self.records.lock().expect("record mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_active_process_types(&self) -> Result<Vec<ProcessType>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        let guard = self.process_types.lock().expect("type mutex poisoned");
        Ok(guard
            .iter()
            .filter(|process_type| process_type.is_active)
            .cloned()
            .collect())
    }
}

/// Sink double that records every attempt and can be made to fail.
#[derive(Default)]
pub(super) struct MemorySink {
    pub(super) sent: Mutex<Vec<(String, String)>>,
    pub(super) attempts: AtomicUsize,
    pub(super) fail_all: AtomicBool,
}

impl MemorySink {
    pub(super) fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .expect("sink mutex poisoned")
            .iter()
            .map(|(subject, _)| subject.clone())
            .collect()
    }

    pub(super) fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl DeliverySink for MemorySink {
    fn send(&self, subject: &str, body: &str) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("sink offline".to_string()));
        }
        self.sent
            .lock()
            .expect("sink mutex poisoned")
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}
