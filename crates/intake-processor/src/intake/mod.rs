//! Process intake pipeline: domain model, validation, process type caching,
//! and the change-triggered notification path.

pub mod cache;
pub mod domain;
pub mod email;
pub mod notifier;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use cache::ProcessTypeCache;
pub use domain::{IntakeRequest, IntakeSubmission, ProcessType, RequestId, PENDING_STATUS};
pub use email::EmailFormatter;
pub use notifier::{change_feed, ChangeFeedHandle, ChangeFeedPump, ChangeNotifier};
pub use router::{intake_router, IntakeRouterState};
pub use service::{IntakeService, IntakeServiceError};
pub use store::{DeliveryError, DeliverySink, RecordStore, StoreError};
pub use validation::{AcceptanceValidator, SubmissionValidator, ValidationResult};
