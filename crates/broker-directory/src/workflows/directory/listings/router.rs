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

use super::domain::{BrokerType, ListingId, ListingKind, ListingStatus};
use super::repository::{ListingQuery, ListingRepository, RepositoryError};

/// Router builder for the public listing surface. Only approved listings
/// are returned here; moderation surfaces go through their own routers.
pub fn listing_router<L>(repository: Arc<L>) -> Router
where
    L: ListingRepository + 'static,
{
    Router::new()
        .route("/api/v1/listings", get(list_handler::<L>))
        .route("/api/v1/listings/search", post(search_handler::<L>))
        .route("/api/v1/listings/:id", get(get_handler::<L>))
        .with_state(repository)
}

/// Search axes with the "all" wildcard the filter bars send.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingSearchRequest {
    #[serde(default)]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) broker_type: Option<String>,
}

impl ListingSearchRequest {
    fn into_query(self) -> ListingQuery {
        ListingQuery {
            status: Some(ListingStatus::Approved),
            kind: self.kind.as_deref().and_then(parse_kind),
            category: self.category.filter(|value| !is_wildcard(value)),
            broker_type: self.broker_type.as_deref().and_then(parse_broker_type),
        }
    }
}

fn is_wildcard(value: &str) -> bool {
    value.trim().is_empty() || value.eq_ignore_ascii_case("all")
}

fn parse_kind(raw: &str) -> Option<ListingKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "software" => Some(ListingKind::Software),
        "service" => Some(ListingKind::Service),
        _ => None,
    }
}

fn parse_broker_type(raw: &str) -> Option<BrokerType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mortgage" => Some(BrokerType::Mortgage),
        "commercial_finance" => Some(BrokerType::CommercialFinance),
        "insurance" => Some(BrokerType::Insurance),
        "property" => Some(BrokerType::Property),
        _ => None,
    }
}

pub(crate) async fn list_handler<L>(State(repository): State<Arc<L>>) -> Response
where
    L: ListingRepository + 'static,
{
    match repository.list(&ListingQuery::approved()) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(err) => repository_error_response(err),
    }
}

pub(crate) async fn search_handler<L>(
    State(repository): State<Arc<L>>,
    axum::Json(request): axum::Json<ListingSearchRequest>,
) -> Response
where
    L: ListingRepository + 'static,
{
    match repository.list(&request.into_query()) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(err) => repository_error_response(err),
    }
}

/// Resolve a listing by id, falling back to slug so public pages can link
/// either way.
pub(crate) async fn get_handler<L>(
    State(repository): State<Arc<L>>,
    Path(id): Path<String>,
) -> Response
where
    L: ListingRepository + 'static,
{
    let by_id = match repository.get(&ListingId(id.clone())) {
        Ok(found) => found,
        Err(err) => return repository_error_response(err),
    };
    let resolved = match by_id {
        Some(listing) => Some(listing),
        None => match repository.get_by_slug(&id) {
            Ok(found) => found,
            Err(err) => return repository_error_response(err),
        },
    };

    match resolved {
        Some(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        None => {
            let payload = json!({ "error": "listing not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn repository_error_response(err: RepositoryError) -> Response {
    let status = match &err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
