//! Centre user API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, PaginatedResponse};
use crate::core::config::PaginationConfig;
use crate::core::shutdown::ShutdownService;
use crate::domain::dataset::{DatasetService, DatasetSnapshot, LoadState};
use crate::domain::records::{FilterOptions, RecordQuery, RecordRow, columns};

use types::{
    ColumnsResponse, DatasetStatusDto, FilterOptionsResponse, ListRecordsQuery, ReloadResponse,
};

/// Shared state for centre user endpoints
#[derive(Clone)]
pub struct CentreUsersApiState {
    pub dataset: Arc<DatasetService>,
    pub pagination: PaginationConfig,
    pub shutdown: ShutdownService,
}

/// Build centre user routes
pub fn routes(
    dataset: Arc<DatasetService>,
    pagination: PaginationConfig,
    shutdown: ShutdownService,
) -> Router<()> {
    let state = CentreUsersApiState {
        dataset,
        pagination,
        shutdown,
    };

    Router::new()
        .route("/", get(list_records))
        .route("/filter-options", get(get_filter_options))
        .route("/columns", get(get_columns))
        .route("/dataset", get(get_dataset_status))
        .route("/dataset/reload", post(reload_dataset))
        .with_state(state)
}

/// Snapshot that can be filtered, or 503 while the first load is pending
fn available_snapshot(state: &CentreUsersApiState) -> Result<DatasetSnapshot, ApiError> {
    let snapshot = state.dataset.snapshot();
    if !snapshot.is_available() {
        tracing::debug!(seq = snapshot.latest_seq, "Dataset not loaded yet");
        return Err(ApiError::dataset_loading());
    }
    Ok(snapshot)
}

fn cache_headers(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(value));
    headers
}

/// List centre user records matching the filters, one page at a time
#[utoipa::path(
    get,
    path = "/api/v1/centre-users",
    tag = "centre-users",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring matched against every field"),
        ("centre_number" = Option<String>, Query, description = "Exact centre number (absent = All)"),
        ("customer_journey_point" = Option<String>, Query, description = "Exact customer journey point (absent = All)"),
        ("training_type" = Option<String>, Query, description = "Exact training type (absent = All)"),
        ("status" = Option<String>, Query, description = "Exact status; empty selects Not Started (absent = All)"),
        ("page" = Option<u32>, Query, description = "Page number (>= 1)"),
        ("limit" = Option<u32>, Query, description = "Items per page (1-500, default from config)")
    ),
    responses(
        (status = 200, description = "Filtered records with pagination metadata"),
        (status = 400, description = "Invalid query parameters"),
        (status = 503, description = "Dataset is still loading")
    )
)]
pub async fn list_records(
    State(state): State<CentreUsersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListRecordsQuery>,
) -> Result<(HeaderMap, Json<PaginatedResponse<RecordRow>>), ApiError> {
    let snapshot = available_snapshot(&state)?;

    let record_query = RecordQuery {
        filter: query.filter_state(),
        page: query.page,
        limit: query.limit.unwrap_or(state.pagination.default_page_size),
    };
    let result = record_query.run(&snapshot.records);

    tracing::debug!(
        total = result.total,
        page = record_query.page,
        limit = record_query.limit,
        "Listed centre user records"
    );

    Ok((
        cache_headers("no-store"),
        Json(PaginatedResponse::new(
            result.rows,
            record_query.page,
            record_query.limit,
            result.total,
        )),
    ))
}

/// Get the choices for each categorical filter
#[utoipa::path(
    get,
    path = "/api/v1/centre-users/filter-options",
    tag = "centre-users",
    responses(
        (status = 200, description = "Filter choices with the All sentinel first", body = FilterOptionsResponse),
        (status = 503, description = "Dataset is still loading")
    )
)]
pub async fn get_filter_options(
    State(state): State<CentreUsersApiState>,
) -> Result<(HeaderMap, Json<FilterOptionsResponse>), ApiError> {
    let snapshot = available_snapshot(&state)?;
    let options = FilterOptions::from_records(&snapshot.records);

    Ok((
        cache_headers("private, max-age=30"),
        Json(FilterOptionsResponse::build(&options, &state.pagination)),
    ))
}

/// Get the grid column schema
#[utoipa::path(
    get,
    path = "/api/v1/centre-users/columns",
    tag = "centre-users",
    responses(
        (status = 200, description = "Columns in display order", body = ColumnsResponse)
    )
)]
pub async fn get_columns() -> (HeaderMap, Json<ColumnsResponse>) {
    (
        cache_headers("public, max-age=3600"),
        Json(ColumnsResponse {
            columns: columns().to_vec(),
        }),
    )
}

/// Get the dataset load state
#[utoipa::path(
    get,
    path = "/api/v1/centre-users/dataset",
    tag = "centre-users",
    responses(
        (status = 200, description = "Dataset load state", body = DatasetStatusDto)
    )
)]
pub async fn get_dataset_status(
    State(state): State<CentreUsersApiState>,
) -> (HeaderMap, Json<DatasetStatusDto>) {
    let snapshot = state.dataset.snapshot();
    (
        cache_headers("no-store"),
        Json(DatasetStatusDto::new(&snapshot, state.dataset.source())),
    )
}

/// Start reloading the dataset in the background
///
/// The previous dataset keeps being served until the new load completes. If
/// several reloads overlap, only the newest one is applied.
#[utoipa::path(
    post,
    path = "/api/v1/centre-users/dataset/reload",
    tag = "centre-users",
    responses(
        (status = 202, description = "Reload started", body = ReloadResponse),
        (status = 503, description = "Server is shutting down")
    )
)]
pub async fn reload_dataset(
    State(state): State<CentreUsersApiState>,
) -> Result<(StatusCode, Json<ReloadResponse>), ApiError> {
    if state.shutdown.is_triggered() {
        return Err(ApiError::service_unavailable(
            "SHUTTING_DOWN",
            "Server is shutting down",
        ));
    }

    let (seq, handle) = state.dataset.spawn_load();
    state.shutdown.register(handle).await;
    tracing::info!(seq, source = %state.dataset.source(), "Dataset reload requested");

    Ok((
        StatusCode::ACCEPTED,
        Json(ReloadResponse {
            seq,
            state: LoadState::Loading,
        }),
    ))
}
