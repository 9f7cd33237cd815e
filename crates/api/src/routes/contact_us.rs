//! ContactUs resource handlers.
//!
//! Each handler parses its inputs into typed values and delegates to
//! [`ContactService`](crate::service::ContactService).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use contact_core::limits::MAX_BULK_DELETE_IDS;
use contact_core::{ContactFilter, ContactId, ContactRecord, Pagination};
use serde::Deserialize;
use tracing::debug;

use crate::extractors::{JsonBody, PathId};
use crate::response::{
    ApiError, DataResponse, MessageResponse, PageResponse, MSG_CREATED, MSG_DELETED, MSG_UPDATED,
};
use crate::state::AppState;

/// Routes relative to the resource prefix.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_handler).post(create_handler).delete(bulk_delete_handler))
        .route("/item/:id", get(get_handler))
        .route("/count", get(count_handler))
        .route("/pagination", get(pagination_handler))
        .route("/:id", put(update_handler).delete(delete_handler))
}

/// Query for `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub text: Option<String>,
}

/// Query for `GET /pagination`. Kept as strings so junk falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub row: Option<String>,
}

/// Body for `DELETE /`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub selected: Vec<String>,
}

/// GET / - List or search.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<DataResponse<Vec<ContactRecord>>>, ApiError> {
    let filter = ContactFilter::from_query(query.id.as_deref(), query.text.as_deref())?;
    let records = state.service.list(&filter).await?;
    Ok(Json(DataResponse::obtained(records)))
}

/// GET /item/:id - One record.
pub async fn get_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<ContactRecord>>, ApiError> {
    let record = state.service.get(id).await?;
    Ok(Json(DataResponse::obtained(record)))
}

/// GET /count - Number of records.
pub async fn count_handler(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<u64>>, ApiError> {
    let total = state.service.count().await?;
    Ok(Json(DataResponse::obtained(total)))
}

/// GET /pagination - One page plus the total.
pub async fn pagination_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse<ContactRecord>>, ApiError> {
    let pagination = Pagination::from_query(query.page.as_deref(), query.row.as_deref());
    let page = state.service.paginate(pagination).await?;
    Ok(Json(PageResponse::obtained(page.records, page.total)))
}

/// POST / - Validate and create.
pub async fn create_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<DataResponse<ContactRecord>>), ApiError> {
    let record = state.service.create(&body).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(record, MSG_CREATED)),
    ))
}

/// PUT /:id - Merge, validate and replace.
pub async fn update_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
    JsonBody(patch): JsonBody,
) -> Result<Json<MessageResponse>, ApiError> {
    if !patch.is_object() {
        return Err(ApiError::bad_request("Update body must be a JSON object"));
    }
    state.service.update(id, &patch).await?;
    Ok(Json(MessageResponse::new(MSG_UPDATED)))
}

/// DELETE /:id - Remove one record.
pub async fn delete_handler(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(id).await?;
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}

/// DELETE / - Remove every record named in `selected`.
pub async fn bulk_delete_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<MessageResponse>, ApiError> {
    let request: BulkDeleteRequest = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid bulk delete body: {}", e)))?;

    if request.selected.len() > MAX_BULK_DELETE_IDS {
        return Err(ApiError::bad_request(format!(
            "Too many ids: {} (max {})",
            request.selected.len(),
            MAX_BULK_DELETE_IDS
        )));
    }

    let ids = ContactId::parse_all(&request.selected)?;
    let removed = state.service.delete_many(&ids).await?;
    debug!(removed, "Bulk delete finished");
    Ok(Json(MessageResponse::new(MSG_DELETED)))
}
