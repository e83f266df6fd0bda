use std::sync::Arc;

use tracing::info;

use super::cache::ProcessTypeCache;
use super::domain::{IntakeRequest, IntakeSubmission, ProcessType};
use super::store::{RecordStore, StoreError};
use super::validation::SubmissionValidator;

/// Service composing the submission validator, process type cache, and store.
pub struct IntakeService<S> {
    store: Arc<S>,
    cache: Arc<ProcessTypeCache<S>>,
    validator: SubmissionValidator<S>,
}

impl<S: RecordStore + 'static> IntakeService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let cache = Arc::new(ProcessTypeCache::new(Arc::clone(&store)));
        Self::with_cache(store, cache)
    }

    pub fn with_cache(store: Arc<S>, cache: Arc<ProcessTypeCache<S>>) -> Self {
        Self {
            validator: SubmissionValidator::new(Arc::clone(&cache)),
            cache,
            store,
        }
    }

    /// Validates a submission and persists it on success, returning the stored
    /// record. Validation failures carry the full ordered error list; store
    /// failures pass through untouched so the caller owns the retry decision.
    pub async fn submit(
        &self,
        submission: IntakeSubmission,
    ) -> Result<IntakeRequest, IntakeServiceError> {
        let result = self.validator.validate(&submission).await?;
        if !result.is_valid() {
            return Err(IntakeServiceError::Validation(result.errors));
        }

        let record = IntakeRequest::from_submission(submission);
        let stored = self.store.create_record(record).await?;
        info!(request_id = %stored.id, "created intake record");
        Ok(stored)
    }

    /// Active process types for read endpoints, served through the cache.
    pub async fn active_process_types(&self) -> Result<Arc<[ProcessType]>, StoreError> {
        self.cache.active_process_types().await
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error("submission failed validation")]
    Validation(Vec<String>),
    #[error(transparent)]
    Store(#[from] StoreError),
}
