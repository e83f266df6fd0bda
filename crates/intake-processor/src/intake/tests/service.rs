use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::common::*;
use crate::intake::domain::{IntakeSubmission, PENDING_STATUS};
use crate::intake::service::{IntakeService, IntakeServiceError};
use crate::intake::store::StoreError;

#[tokio::test]
async fn submit_assigns_identity_and_persists() {
    let store = Arc::new(MemoryStore::default());
    let service = IntakeService::new(Arc::clone(&store));

    let stored = service
        .submit(valid_submission())
        .await
        .expect("valid submission persists");

    assert!(!stored.id.as_str().is_empty());
    assert_eq!(stored.status, PENDING_STATUS);

    let records = store.records.lock().expect("record mutex poisoned");
    assert!(records.contains_key(&stored.id));
}

#[tokio::test]
async fn submit_returns_ordered_validation_errors() {
    let service = IntakeService::new(Arc::new(MemoryStore::default()));

    let submission = IntakeSubmission {
        requestor_name: String::new(),
        requestor_email: "nope".to_string(),
        ..valid_submission()
    };

    match service.submit(submission).await {
        Err(IntakeServiceError::Validation(errors)) => {
            assert_eq!(
                errors,
                vec!["Requestor Name is required", "Requestor Email is not valid"]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn store_failure_on_create_passes_through() {
    let store = Arc::new(MemoryStore::default());
    store.fail_create.store(true, Ordering::SeqCst);
    let service = IntakeService::new(Arc::clone(&store));

    match service.submit(valid_submission()).await {
        Err(IntakeServiceError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store failure, got {other:?}"),
    }
}

#[tokio::test]
async fn active_process_types_are_cache_backed() {
    let store = Arc::new(MemoryStore::default());
    let service = IntakeService::new(Arc::clone(&store));

    let types = service
        .active_process_types()
        .await
        .expect("listing succeeds");
    assert_eq!(types.len(), 2);

    service
        .active_process_types()
        .await
        .expect("cached listing succeeds");
    assert_eq!(store.list_call_count(), 1);
}
