use crate::error::PassError;
use crate::files::{http_date, parse_http_date, PassFileResolver, PASS_CONTENT_TYPE};
use crate::logic::{
    deregister_device, list_updated, not_modified, pass_retrieval_path, register_device,
    RegistrationOutcome,
};
use crate::models::{PushQueryResponse, RegistrationPayload, UpdatedSinceQuery};
use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use passhub_common::HttpStatusCode;
use passhub_config::AppConfig;
use passhub_db::PushAssociationRepository;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::info;

/// Shared state for the PassKit handlers.
#[derive(Clone)]
pub struct PassesState {
    pub config: Arc<AppConfig>,
    pub repo: Arc<dyn PushAssociationRepository>,
    pub resolver: PassFileResolver,
}

impl PassesState {
    fn pass_type(&self) -> &str {
        &self.config.passes.pass_type_identifier
    }
}

fn error_response(err: PassError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/v1/devices/{device_id}/registrations/{pass_type}/{pass_id}",
    request_body = RegistrationPayload,
    responses(
        (status = 201, description = "New registration stored"),
        (status = 200, description = "Triple already registered, nothing changed"),
        (status = 400, description = "Unknown pass type or missing push token")
    ),
    tag = "PassKit"
))]
pub async fn register_device_handler(
    State(state): State<Arc<PassesState>>,
    Path((device_id, pass_type, pass_id)): Path<(String, String, String)>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<StatusCode, (StatusCode, String)> {
    match register_device(
        state.repo.as_ref(),
        state.pass_type(),
        &device_id,
        &pass_type,
        &pass_id,
        payload.push_token,
    )
    .await
    {
        Ok(RegistrationOutcome::Created) => Ok(StatusCode::CREATED),
        Ok(RegistrationOutcome::AlreadyRegistered) => Ok(StatusCode::OK),
        Err(err) => Err(error_response(err)),
    }
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/v1/devices/{device_id}/registrations/{pass_type}",
    responses(
        (status = 200, description = "Serial numbers updated since the tag", body = PushQueryResponse),
        (status = 400, description = "Unknown pass type")
    ),
    tag = "PassKit"
))]
pub async fn list_updated_handler(
    State(state): State<Arc<PassesState>>,
    Path((device_id, pass_type)): Path<(String, String)>,
    Query(query): Query<UpdatedSinceQuery>,
) -> Result<Json<PushQueryResponse>, (StatusCode, String)> {
    list_updated(
        state.repo.as_ref(),
        state.pass_type(),
        &device_id,
        &pass_type,
        query.passes_updated_since,
    )
    .await
    .map(Json)
    .map_err(error_response)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/v1/devices/{device_id}/registrations/{pass_type}/{pass_id}",
    responses(
        (status = 200, description = "Deregistered; also returned when nothing matched"),
        (status = 400, description = "Unknown pass type")
    ),
    tag = "PassKit"
))]
pub async fn deregister_device_handler(
    State(state): State<Arc<PassesState>>,
    Path((device_id, pass_type, pass_id)): Path<(String, String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    deregister_device(
        state.repo.as_ref(),
        state.pass_type(),
        &device_id,
        &pass_type,
        &pass_id,
    )
    .await
    .map(|_| StatusCode::OK)
    .map_err(error_response)
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/v1/passes/{pass_type}/{serial_number}",
    responses(
        (status = 200, description = "Pass file, streamed"),
        (status = 304, description = "Client copy is at least as fresh as the file"),
        (status = 400, description = "Unknown pass type"),
        (status = 404, description = "No pass file for this serial number")
    ),
    tag = "PassKit"
))]
pub async fn get_pass_handler(
    State(state): State<Arc<PassesState>>,
    Path((pass_type, serial_number)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    if pass_type != state.pass_type() {
        return Err(error_response(PassError::InvalidPassType));
    }

    let resolved = state
        .resolver
        .resolve(&serial_number)
        .await
        .map_err(error_response)?;

    let if_modified_since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date);

    if not_modified(if_modified_since, resolved.last_modified) {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    // Stream the file chunk-wise; pass files are served to many devices at
    // once and must not be buffered whole per request.
    let body = Body::from_stream(ReaderStream::new(resolved.file));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PASS_CONTENT_TYPE)
        .header(header::LAST_MODIFIED, http_date(resolved.last_modified))
        .body(body)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/v1/log",
    responses((status = 200, description = "Payload accepted")),
    tag = "PassKit"
))]
pub async fn log_handler(body: Bytes) -> impl IntoResponse {
    info!("PassKit client log: {}", String::from_utf8_lossy(&body));
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
    )
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/{serial_number}",
    responses((status = 303, description = "Redirect to the canonical pass path")),
    tag = "PassKit"
))]
pub async fn redirect_legacy_handler(
    State(state): State<Arc<PassesState>>,
    Path(serial_number): Path<String>,
) -> Redirect {
    Redirect::to(&pass_retrieval_path(state.pass_type(), &serial_number))
}
