use std::future::{Future, IntoFuture};
use std::net::TcpListener;

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};
use uuid::Uuid;

use error::ApiError;
use store::PersonStore;
use structs::api;

use crate::configuration::DatabaseConfiguration;

pub mod structs;
pub mod configuration;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod validation;

const MISSING_SEARCH_TERM: &str = "O termo de busca é obrigatório";

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[instrument(skip(store))]
async fn get_person(
    State(store): State<PersonStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    // An id that is not a UUID cannot name a stored person.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound)?;
    let dev = store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;

    Ok((StatusCode::OK, Json(api::PersonBody::from(dev))))
}

#[instrument(skip(store, headers, body))]
async fn create_person(
    State(store): State<PersonStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let body = api::CreatePersonBody::parse(content_type, &body)?;

    let new_person = validation::validate(&store, body).await?;
    let submitted_stack = new_person.stack.clone();

    let mut dev = store.insert(new_person).await?;
    if !submitted_stack.is_empty() {
        dev.stack = Some(submitted_stack);
    }
    info!(id = %dev.id, nickname = %dev.nickname, "person created");

    Ok((
        StatusCode::OK,
        [(header::LOCATION, format!("/persons/{}", dev.id))],
        Json(api::PersonBody::from(dev)),
    ))
}

#[instrument(skip(store))]
async fn search_persons(
    State(store): State<PersonStore>,
    Query(query): Query<api::SearchPersonQuery>,
) -> Result<Response, ApiError> {
    let Some(search_term) = query.search_term.filter(|term| !term.is_empty()) else {
        return Ok((StatusCode::OK, MISSING_SEARCH_TERM).into_response());
    };

    let found_devs = store.search(&search_term).await?;

    Ok((
        StatusCode::OK,
        Json(
            found_devs
                .into_iter()
                .map(api::PersonBody::from)
                .collect::<Vec<api::PersonBody>>(),
        ),
    )
        .into_response())
}

#[instrument(skip(store))]
async fn count_persons(State(store): State<PersonStore>) -> Result<impl IntoResponse, ApiError> {
    let count = store.count().await?;

    Ok((StatusCode::OK, count.to_string()))
}

/// Serves the app on an already-bound listener until the future is dropped.
pub fn run(
    listener: TcpListener,
    store: PersonStore,
) -> Result<impl Future<Output = std::io::Result<()>> + Send, std::io::Error> {
    listener.set_nonblocking(true)?;
    let listener = tokio::net::TcpListener::from_std(listener)?;

    Ok(axum::serve(listener, app(store)).into_future())
}

pub async fn get_database_connection(
    database_config: DatabaseConfiguration,
) -> Result<PersonStore, store::Error> {
    if database_config.is_in_memory() {
        PersonStore::open_in_memory().await
    } else {
        PersonStore::open(&database_config.path).await
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id,
    )
}

fn app(store: PersonStore) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(PropagateRequestIdLayer::x_request_id());

    Router::new()
        .route("/health-check", get(health_check))
        .route("/persons/:id", get(get_person))
        .route("/persons", post(create_person).get(search_persons))
        .route("/count-persons", get(count_persons))
        .route("/pessoas/:id", get(get_person))
        .route("/pessoas", post(create_person).get(search_persons))
        .route("/contagem-pessoas", get(count_persons))
        .layer(middleware)
        .with_state(store)
}
