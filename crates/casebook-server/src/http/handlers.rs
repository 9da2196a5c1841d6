//! Endpoint handlers
//!
//! Handlers only translate between HTTP and the casebook services. Each one
//! runs inside its own `tracing` span. Email path parameters are never
//! recorded on a span.

use super::error::ApiError;
use super::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use casebook_core::{Credentials, EditRequest, Registration};
use casebook_model::{Fields, Submission};
use serde::Deserialize;
use serde_json::{json, Value};

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub(crate) struct GroupQuery {
    group: Option<String>,
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": casebook_core::VERSION }))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    body: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(form) = body?;
    let user = state.casebook.auth.register(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "user": user })),
    ))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(credentials) = body?;
    let user = state.casebook.auth.verify(&credentials).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    let user = state.casebook.auth.profile(&email).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn submit_case_study(
    State(state): State<AppState>,
    body: Result<Json<Fields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(draft) = body?;
    let id = state.casebook.case_studies.submit(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Case study submitted", "id": id })),
    ))
}

pub(crate) async fn list_case_studies(State(state): State<AppState>) -> Json<Vec<Submission>> {
    Json(state.casebook.case_studies.list().await)
}

#[tracing::instrument(skip(state))]
pub(crate) async fn get_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Submission>> {
    Ok(Json(state.casebook.case_studies.get(&id).await?))
}

#[tracing::instrument(skip(state, body))]
pub(crate) async fn update_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Fields>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(patch) = body?;
    let updated = state.casebook.case_studies.update(&id, &patch).await?;
    Ok(Json(json!({ "success": true, "caseStudy": updated })))
}

#[tracing::instrument(skip(state))]
pub(crate) async fn delete_case_study(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    state.casebook.case_studies.delete(&id).await?;
    Ok(Json(json!({ "success": true, "message": "Case study deleted" })))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn submit_focus_group(
    State(state): State<AppState>,
    body: Result<Json<Fields>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let Json(draft) = body?;
    let key = state.casebook.focus_groups.submit(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Focus group submission stored",
            "submissionId": key.to_string(),
        })),
    ))
}

pub(crate) async fn list_focus_group_submissions(
    State(state): State<AppState>,
) -> Json<Vec<Submission>> {
    Json(state.casebook.focus_groups.list().await)
}

#[tracing::instrument(skip_all)]
pub(crate) async fn group_submissions(
    State(state): State<AppState>,
    query: Result<Query<GroupQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Submission>>> {
    let Query(query) = query?;
    let group = query.group.unwrap_or_default();
    Ok(Json(state.casebook.focus_groups.by_group(&group).await?))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn edit_submission(
    State(state): State<AppState>,
    body: Result<Json<EditRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = body?;
    let outcome = state.casebook.focus_groups.edit(&request).await?;
    let message = if outcome.is_new_version() {
        "Edited version created"
    } else {
        "Edited version updated"
    };
    Ok(Json(json!({
        "success": true,
        "message": message,
        "newSubmissionId": outcome.new_submission_id(),
        "isNewVersion": outcome.is_new_version(),
    })))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn user_value_history(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Json<Value> {
    let values = state.casebook.value_history(&email).await;
    Json(json!({ "success": true, "values": values }))
}

#[tracing::instrument(skip_all)]
pub(crate) async fn user_tension_history(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Json<Value> {
    let tensions = state.casebook.tension_history(&email).await;
    Json(json!({ "success": true, "tensions": tensions }))
}
