use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for persisted intake records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Mints a fresh identifier for a record that does not have one yet.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status assigned to every record at creation. The lifecycle beyond intake is
/// owned by downstream systems, so this stays a plain string.
pub const PENDING_STATUS: &str = "Pending";

fn default_status() -> String {
    PENDING_STATUS.to_string()
}

/// A persisted process intake record.
///
/// The identifier and creation timestamp are assigned exactly once, when the
/// submission is accepted; nothing in this crate mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub id: RequestId,
    pub requestor_name: String,
    pub requestor_email: String,
    pub job_title: String,
    pub process_requested: String,
    pub required_completion_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_date: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl IntakeRequest {
    /// Promotes a validated submission into a record, assigning identity,
    /// creation timestamp, and the initial status.
    pub fn from_submission(submission: IntakeSubmission) -> Self {
        Self {
            id: RequestId::generate(),
            requestor_name: submission.requestor_name,
            requestor_email: submission.requestor_email,
            job_title: submission.job_title,
            process_requested: submission.process_requested,
            required_completion_date: submission.required_completion_date,
            comments: submission.comments,
            created_date: Utc::now(),
            status: default_status(),
        }
    }
}

/// Client-facing submission payload. String fields default to empty so a
/// missing field surfaces as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSubmission {
    #[serde(default)]
    pub requestor_name: String,
    #[serde(default)]
    pub requestor_email: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub process_requested: String,
    #[serde(default)]
    pub required_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Administrator-curated category that a submission's requested process must
/// name. The set is owned by the backing store and cached read-mostly here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessType {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}
