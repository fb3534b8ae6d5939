//! Problem handlers: list, read, create, delete, status update.

use crate::error::AppError;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

/// Only plain unsigned digit strings name a problem; signs, spaces and
/// anything that overflows are unknown ids.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    id_str.parse().map_err(|_| AppError::NotFound)
}

/// Absolute when the request carried a Host header, otherwise a bare path.
fn location_for(headers: &HeaderMap, id: i64) -> String {
    let path = format!("/problems/problemid/{}", id);
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path,
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let problems = state.store.list_all().await?;
    Ok((StatusCode::OK, Json(problems)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let problem = state.store.get(id).await?;
    Ok((StatusCode::OK, Json(problem)))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::parse_body(&body?)?;
    let new = RequestValidator::new_problem(body.as_ref())?;
    let problem = state.store.insert(&new).await?;
    tracing::info!(id = problem.id, title = %problem.title, "problem created");
    let location = location_for(&headers, problem.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(problem),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete(id).await?;
    tracing::info!(id, "problem deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::parse_body(&body?)?;
    let status = RequestValidator::status_update(body.as_ref())?;
    let id = parse_id(&id_str)?;
    let problem = state.store.update_status(id, status).await?;
    tracing::info!(id, status = %status, "problem status updated");
    Ok((StatusCode::OK, Json(problem)))
}
