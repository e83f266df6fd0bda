use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{error, warn};

use super::domain::IntakeSubmission;
use super::notifier::ChangeFeedHandle;
use super::service::{IntakeService, IntakeServiceError};
use super::store::RecordStore;

/// State shared by the intake endpoints: the service plus the change feed
/// handle used to announce newly durable records.
pub struct IntakeRouterState<S> {
    pub service: Arc<IntakeService<S>>,
    pub feed: ChangeFeedHandle,
}

impl<S> Clone for IntakeRouterState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            feed: self.feed.clone(),
        }
    }
}

/// Router builder exposing the HTTP endpoints for intake submission.
pub fn intake_router<S>(state: IntakeRouterState<S>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/v1/intake/requests", post(submit_handler::<S>))
        .route(
            "/api/v1/intake/process-types",
            get(process_types_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn submit_handler<S>(
    State(state): State<IntakeRouterState<S>>,
    payload: Result<Json<IntakeSubmission>, JsonRejection>,
) -> Response
where
    S: RecordStore + 'static,
{
    // A payload that fails to parse is a bad request, surfaced before any
    // validation rule runs.
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "rejecting malformed submission payload");
            let body = json!({ "success": false, "error": "Invalid JSON format" });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match state.service.submit(submission).await {
        Ok(record) => {
            state.feed.publish(vec![record.clone()]);
            let body = json!({
                "success": true,
                "requestId": record.id,
                "message": "Request submitted successfully",
            });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(IntakeServiceError::Validation(errors)) => {
            let body = json!({ "success": false, "errors": errors });
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        Err(IntakeServiceError::Store(err)) => {
            error!(error = %err, "store failure during submission");
            let body = json!({
                "success": false,
                "error": "An error occurred while processing your request",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn process_types_handler<S>(
    State(state): State<IntakeRouterState<S>>,
) -> Response
where
    S: RecordStore + 'static,
{
    match state.service.active_process_types().await {
        Ok(types) => {
            let names: Vec<&str> = types
                .iter()
                .filter(|process_type| process_type.is_active)
                .map(|process_type| process_type.name.as_str())
                .collect();
            (StatusCode::OK, Json(json!({ "processTypes": names }))).into_response()
        }
        Err(err) => {
            error!(error = %err, "store failure listing process types");
            let body = json!({ "success": false, "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
