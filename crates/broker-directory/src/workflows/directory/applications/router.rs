use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ApplicationId;
use super::repository::ApplicationRepository;
use super::service::{ApplicationIntakeService, IntakeError};
use crate::workflows::directory::listings::{ListingRepository, RepositoryError};
use crate::workflows::directory::notify::NotificationSender;

/// Router builder exposing the admin-facing intake endpoints.
pub fn application_router<L, A, N>(service: Arc<ApplicationIntakeService<L, A, N>>) -> Router
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications/pending",
            get(pending_handler::<L, A, N>),
        )
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<L, A, N>),
        )
        .route(
            "/api/v1/applications/:application_id/approve",
            post(approve_handler::<L, A, N>),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject_handler::<L, A, N>),
        )
        .route(
            "/api/v1/applications/:application_id/notes",
            put(notes_handler::<L, A, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApproveApplicationRequest {
    #[serde(default)]
    pub(crate) admin_notes: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectApplicationRequest {
    #[serde(default)]
    pub(crate) admin_notes: String,
    #[serde(default)]
    pub(crate) reject_reason: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveNotesRequest {
    #[serde(default)]
    pub(crate) notes: String,
}

pub(crate) async fn pending_handler<L, A, N>(
    State(service): State<Arc<ApplicationIntakeService<L, A, N>>>,
) -> Response
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.pending() {
        Ok(applications) => (StatusCode::OK, axum::Json(applications)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn get_handler<L, A, N>(
    State(service): State<Arc<ApplicationIntakeService<L, A, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn approve_handler<L, A, N>(
    State(service): State<Arc<ApplicationIntakeService<L, A, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<ApproveApplicationRequest>,
) -> Response
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.approve(&ApplicationId(application_id), &request.admin_notes) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn reject_handler<L, A, N>(
    State(service): State<Arc<ApplicationIntakeService<L, A, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<RejectApplicationRequest>,
) -> Response
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.reject(
        &ApplicationId(application_id),
        &request.admin_notes,
        &request.reject_reason,
    ) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

pub(crate) async fn notes_handler<L, A, N>(
    State(service): State<Arc<ApplicationIntakeService<L, A, N>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<SaveNotesRequest>,
) -> Response
where
    L: ListingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.save_notes(&ApplicationId(application_id), &request.notes) {
        Ok(application) => (StatusCode::OK, axum::Json(application)).into_response(),
        Err(err) => intake_error_response(err),
    }
}

fn intake_error_response(err: IntakeError) -> Response {
    let status = match &err {
        IntakeError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        IntakeError::Repository(RepositoryError::Conflict) | IntakeError::AlreadyDecided { .. } => {
            StatusCode::CONFLICT
        }
        IntakeError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
