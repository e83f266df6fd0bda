use std::sync::{Arc, OnceLock};

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::cache::ProcessTypeCache;
use super::domain::{IntakeRequest, IntakeSubmission};
use super::store::{RecordStore, StoreError};

/// Outcome of running a rule set over a candidate request.
///
/// Every rule is evaluated unconditionally, so `errors` reflects the complete
/// set of violations in rule order, not just the first one found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
    })
}

fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Submission-time rule set. The process type rule consults the cache and may
/// suspend on a store fetch; a store failure propagates rather than masquerade
/// as a validation error.
pub struct SubmissionValidator<S> {
    cache: Arc<ProcessTypeCache<S>>,
}

impl<S: RecordStore> SubmissionValidator<S> {
    pub fn new(cache: Arc<ProcessTypeCache<S>>) -> Self {
        Self { cache }
    }

    pub async fn validate(
        &self,
        candidate: &IntakeSubmission,
    ) -> Result<ValidationResult, StoreError> {
        self.validate_at(candidate, Utc::now().date_naive()).await
    }

    pub(crate) async fn validate_at(
        &self,
        candidate: &IntakeSubmission,
        today: NaiveDate,
    ) -> Result<ValidationResult, StoreError> {
        let mut errors = Vec::new();

        if is_blank(&candidate.requestor_name) {
            errors.push("Requestor Name is required".to_string());
        }

        if is_blank(&candidate.requestor_email) {
            errors.push("Requestor Email is required".to_string());
        } else if !is_valid_email(candidate.requestor_email.trim()) {
            errors.push("Requestor Email is not valid".to_string());
        }

        if is_blank(&candidate.job_title) {
            errors.push("Job Title is required".to_string());
        }

        if is_blank(&candidate.process_requested) {
            errors.push("Process Requested is required".to_string());
        } else if !self.is_known_process_type(&candidate.process_requested).await? {
            errors.push(format!(
                "Process Requested '{}' is not a valid process type",
                candidate.process_requested
            ));
        }

        match candidate.required_completion_date {
            None => errors.push("Required Completion Date is required".to_string()),
            Some(date) if date < today => {
                errors.push("Required Completion Date cannot be in the past".to_string());
            }
            Some(_) => {}
        }

        if !errors.is_empty() {
            warn!(error_count = errors.len(), "submission failed validation");
        }

        Ok(ValidationResult { errors })
    }

    async fn is_known_process_type(&self, requested: &str) -> Result<bool, StoreError> {
        let types = self.cache.active_process_types().await?;
        Ok(types.iter().any(|process_type| {
            process_type.is_active && process_type.name.eq_ignore_ascii_case(requested.trim())
        }))
    }
}

/// Stricter rule set applied to durable records before notifying.
///
/// Runs without store access: the record id must be present, the process field
/// is checked for presence only, and a completion date equal to today is
/// rejected. The submission validator accepts today; the two boundaries are
/// deliberately kept distinct rather than reconciled.
pub struct AcceptanceValidator;

impl AcceptanceValidator {
    pub fn validate(&self, record: &IntakeRequest) -> ValidationResult {
        self.validate_at(record, Utc::now().date_naive())
    }

    pub(crate) fn validate_at(&self, record: &IntakeRequest, today: NaiveDate) -> ValidationResult {
        let mut errors = Vec::new();

        if is_blank(record.id.as_str()) {
            errors.push("Unique Record ID is required".to_string());
        }

        if is_blank(&record.requestor_name) {
            errors.push("Requestor Name is required".to_string());
        }

        if is_blank(&record.requestor_email) {
            errors.push("Requestor Email is required".to_string());
        } else if !is_valid_email(record.requestor_email.trim()) {
            errors.push("Requestor Email is not in a valid format".to_string());
        }

        if is_blank(&record.job_title) {
            errors.push("Job Title is required".to_string());
        }

        if is_blank(&record.process_requested) {
            errors.push("Process Requested is required".to_string());
        }

        match record.required_completion_date {
            None => errors.push("Required Completion Date is required".to_string()),
            Some(date) if date <= today => {
                errors.push("Required Completion Date must be in the future".to_string());
            }
            Some(_) => {}
        }

        ValidationResult { errors }
    }
}
