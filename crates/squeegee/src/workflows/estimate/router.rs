use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::document::{PlainTextRenderer, QuoteRenderer};
use super::domain::{CareerApplication, ContactMessage, QuoteId, QuoteRequest};
use super::repository::{LeadNotifier, QuoteReceipt, QuoteRepository, RepositoryError};
use super::service::{EstimateService, EstimateServiceError, DEFAULT_RECENT_QUOTES};

const MISSING_FIELDS: &str = "Missing required fields";

/// Router builder exposing the lead intake endpoints.
pub fn estimate_router<R, N>(service: Arc<EstimateService<R, N>>) -> Router
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    Router::new()
        .route(
            "/api/quote",
            post(submit_quote_handler::<R, N>).get(recent_quotes_handler::<R, N>),
        )
        .route("/api/quote/preview", post(preview_quote_handler::<R, N>))
        .route("/api/quote/:quote_id", get(quote_handler::<R, N>))
        .route(
            "/api/quote/:quote_id/document",
            get(quote_document_handler::<R, N>),
        )
        .route("/api/contact", post(contact_handler::<R, N>))
        .route("/api/career", post(career_handler::<R, N>))
        .with_state(service)
}

fn failure(status: StatusCode, message: &str) -> Response {
    let payload = json!({
        "success": false,
        "error": message,
    });
    (status, Json(payload)).into_response()
}

fn rejected(rejection: JsonRejection) -> Response {
    warn!(error = %rejection, "malformed lead payload");
    failure(StatusCode::BAD_REQUEST, MISSING_FIELDS)
}

pub(crate) async fn submit_quote_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection),
    };

    match service.submit_quote(request) {
        Ok(record) => (StatusCode::OK, Json(record.receipt())).into_response(),
        Err(EstimateServiceError::Intake(_)) => failure(StatusCode::BAD_REQUEST, MISSING_FIELDS),
        Err(other) => {
            error!(error = %other, "quote submission failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit quote request",
            )
        }
    }
}

pub(crate) async fn preview_quote_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return rejected(rejection),
    };

    match service.preview(&request) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(_) => failure(StatusCode::BAD_REQUEST, MISSING_FIELDS),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecentQuotesQuery {
    limit: Option<usize>,
}

pub(crate) async fn recent_quotes_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    query: Result<Query<RecentQuotesQuery>, QueryRejection>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(error = %rejection, "malformed quote listing query");
            return failure(StatusCode::BAD_REQUEST, "Invalid limit");
        }
    };

    match service.recent_quotes(query.limit.unwrap_or(DEFAULT_RECENT_QUOTES)) {
        Ok(records) => {
            let quotes: Vec<QuoteReceipt> = records.iter().map(|record| record.receipt()).collect();
            (
                StatusCode::OK,
                Json(json!({ "success": true, "quotes": quotes })),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "quote listing failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load quotes")
        }
    }
}

pub(crate) async fn quote_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    Path(quote_id): Path<String>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    match service.get_quote(&QuoteId(quote_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => lookup_failure(err),
    }
}

pub(crate) async fn quote_document_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    Path(quote_id): Path<String>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let renderer = PlainTextRenderer;
    match service.render_quote(&QuoteId(quote_id), &renderer) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, renderer.content_type())],
            bytes,
        )
            .into_response(),
        Err(err) => lookup_failure(err),
    }
}

fn lookup_failure(err: EstimateServiceError) -> Response {
    match err {
        EstimateServiceError::Repository(RepositoryError::NotFound) => {
            failure(StatusCode::NOT_FOUND, "Quote not found")
        }
        other => {
            error!(error = %other, "quote lookup failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load quote")
        }
    }
}

pub(crate) async fn contact_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    payload: Result<Json<ContactMessage>, JsonRejection>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let Json(message) = match payload {
        Ok(message) => message,
        Err(rejection) => return rejected(rejection),
    };

    match service.submit_contact(message) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Message sent" })),
        )
            .into_response(),
        Err(EstimateServiceError::Intake(_)) => failure(StatusCode::BAD_REQUEST, MISSING_FIELDS),
        Err(other) => {
            error!(error = %other, "contact email failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
    }
}

pub(crate) async fn career_handler<R, N>(
    State(service): State<Arc<EstimateService<R, N>>>,
    payload: Result<Json<CareerApplication>, JsonRejection>,
) -> Response
where
    R: QuoteRepository + 'static,
    N: LeadNotifier + 'static,
{
    let Json(application) = match payload {
        Ok(application) => application,
        Err(rejection) => return rejected(rejection),
    };

    match service.submit_career(application) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Application submitted" })),
        )
            .into_response(),
        Err(EstimateServiceError::Intake(_)) => failure(StatusCode::BAD_REQUEST, MISSING_FIELDS),
        Err(other) => {
            error!(error = %other, "career email failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit application",
            )
        }
    }
}
