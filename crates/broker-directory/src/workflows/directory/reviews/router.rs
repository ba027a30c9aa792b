use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ReviewId, ReviewSubmission};
use super::repository::ReviewRepository;
use super::service::{ModerationError, ReviewModerationService};
use crate::workflows::directory::listings::{ListingId, ListingRepository, RepositoryError};
use crate::workflows::directory::notify::NotificationSender;

/// Router builder exposing HTTP endpoints for submission and moderation.
pub fn review_router<L, R, N>(service: Arc<ReviewModerationService<L, R, N>>) -> Router
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings/:listing_id/reviews",
            post(submit_handler::<L, R, N>),
        )
        .route("/api/v1/reviews/pending", get(pending_handler::<L, R, N>))
        .route("/api/v1/reviews/queue", get(queue_handler::<L, R, N>))
        .route(
            "/api/v1/reviews/:review_id/approve",
            post(approve_handler::<L, R, N>),
        )
        .route(
            "/api/v1/reviews/:review_id/reject",
            post(reject_handler::<L, R, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RejectReviewRequest {
    #[serde(default)]
    pub(crate) reason: String,
}

pub(crate) async fn submit_handler<L, R, N>(
    State(service): State<Arc<ReviewModerationService<L, R, N>>>,
    Path(listing_id): Path<String>,
    axum::Json(submission): axum::Json<ReviewSubmission>,
) -> Response
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.submit(ListingId(listing_id), submission) {
        Ok(review) => (StatusCode::ACCEPTED, axum::Json(review)).into_response(),
        Err(err) => moderation_error_response(err),
    }
}

pub(crate) async fn pending_handler<L, R, N>(
    State(service): State<Arc<ReviewModerationService<L, R, N>>>,
) -> Response
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.pending() {
        Ok(reviews) => (StatusCode::OK, axum::Json(reviews)).into_response(),
        Err(err) => moderation_error_response(err),
    }
}

pub(crate) async fn queue_handler<L, R, N>(
    State(service): State<Arc<ReviewModerationService<L, R, N>>>,
) -> Response
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.queue() {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => moderation_error_response(err),
    }
}

pub(crate) async fn approve_handler<L, R, N>(
    State(service): State<Arc<ReviewModerationService<L, R, N>>>,
    Path(review_id): Path<String>,
) -> Response
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.approve(&ReviewId(review_id)) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(err) => moderation_error_response(err),
    }
}

pub(crate) async fn reject_handler<L, R, N>(
    State(service): State<Arc<ReviewModerationService<L, R, N>>>,
    Path(review_id): Path<String>,
    axum::Json(request): axum::Json<RejectReviewRequest>,
) -> Response
where
    L: ListingRepository + 'static,
    R: ReviewRepository + 'static,
    N: NotificationSender + 'static,
{
    match service.reject(&ReviewId(review_id), &request.reason) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(err) => moderation_error_response(err),
    }
}

fn moderation_error_response(err: ModerationError) -> Response {
    let status = match &err {
        ModerationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ModerationError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ModerationError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ModerationError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
