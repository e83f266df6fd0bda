use async_trait::async_trait;

use super::domain::{IntakeRequest, ProcessType};

/// Persistence boundary so the intake service can be exercised in isolation.
///
/// Implementations partition records by their own identifier; the core never
/// reads records back, it only creates them and lists the process type set.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record, returning it with whatever identity metadata the
    /// store assigned.
    async fn create_record(&self, record: IntakeRequest) -> Result<IntakeRequest, StoreError>;

    /// Lists the process types currently marked active.
    async fn list_active_process_types(&self) -> Result<Vec<ProcessType>, StoreError>;
}

/// Error enumeration for store failures. Callers own the retry policy; the
/// core forwards these untouched.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("store rejected the operation: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification boundary. The current system only renders content and
/// logs the outcome; a real mail integration would live behind this trait.
pub trait DeliverySink: Send + Sync {
    fn send(&self, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Delivery dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
}
