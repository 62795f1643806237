//! Content handlers: thin translation between the transport layer and
//! the content service.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::application::content::{ListRequest, StatusSelector};
use crate::application::repos::{ContentPatch, NewContent};
use crate::domain::content::ContentStatus;
use crate::infra::http::error::{ApiError, content_error_to_api};
use crate::infra::http::models::ApiEnvelope;
use crate::infra::http::query::numeric_param;
use crate::infra::http::state::ApiState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    status: Vec<String>,
    limit: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateContentRequest {
    slug: String,
    title: String,
    description: String,
    #[serde(rename = "subDesc")]
    sub_desc: String,
    alt: String,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: String,
    tags: Vec<String>,
    related: Vec<String>,
    status: ContentStatus,
    created_by: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    by: String,
    slug: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "subDesc")]
    sub_desc: Option<String>,
    alt: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
    tags: Option<Vec<String>>,
    related: Option<Vec<String>>,
    status: Option<ContentStatus>,
}

pub async fn list_contents(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let status = match params.status.len() {
        0 => None,
        1 => Some(StatusSelector::One(params.status.into_iter().next().expect(
            "length checked",
        ))),
        _ => Some(StatusSelector::Many(params.status)),
    };

    let request = ListRequest {
        status,
        limit: numeric_param(params.limit.as_deref()),
        page: numeric_param(params.page.as_deref()),
    };

    let contents = state
        .contents
        .list(request)
        .await
        .map_err(|err| content_error_to_api(err, "Query failed"))?;

    Ok(Json(ApiEnvelope::ok(
        "Successfully get contents.",
        contents,
    )))
}

pub async fn get_content(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_slug(&slug)?;

    let content = state
        .contents
        .get(&slug)
        .await
        .map_err(|err| content_error_to_api(err, "Query failed"))?;

    Ok(Json(ApiEnvelope::ok(
        format!("Successfully get {slug} data."),
        content,
    )))
}

pub async fn create_content(
    State(state): State<ApiState>,
    Json(payload): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_non_empty(&payload.slug)?;
    ensure_non_empty(&payload.title)?;
    ensure_non_empty(&payload.created_by)?;

    let slug = payload.slug.clone();
    let content = NewContent {
        slug: payload.slug,
        title: payload.title,
        description: payload.description,
        sub_desc: payload.sub_desc,
        alt: payload.alt,
        thumbnail_url: payload.thumbnail_url,
        tags: payload.tags,
        related: payload.related,
        status: payload.status,
        created_by: payload.created_by,
    };

    state
        .contents
        .create(content)
        .await
        .map_err(|err| content_error_to_api(err, "Internal server error"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::<()>::message_only(format!(
            "Successfully create {slug} data"
        ))),
    ))
}

pub async fn update_content(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_slug(&slug)?;
    ensure_non_empty(&payload.by)?;

    let patch = ContentPatch {
        slug: payload.slug,
        title: payload.title,
        description: payload.description,
        sub_desc: payload.sub_desc,
        alt: payload.alt,
        thumbnail_url: payload.thumbnail_url,
        tags: payload.tags,
        related: payload.related,
        status: payload.status,
    };

    state
        .contents
        .update(&slug, &patch, &payload.by)
        .await
        .map_err(|err| content_error_to_api(err, "Internal server error"))?;

    Ok(Json(ApiEnvelope::<()>::message_only(format!(
        "Successfully update {slug} data"
    ))))
}

pub async fn delete_content(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_slug(&slug)?;

    state
        .contents
        .delete(&slug)
        .await
        .map_err(|err| content_error_to_api(err, "Internal server error"))?;

    Ok(Json(ApiEnvelope::<()>::message_only(format!(
        "Successfully delete {slug} data"
    ))))
}

fn validate_slug(slug: &str) -> Result<(), ApiError> {
    if slug.trim().is_empty() {
        return Err(ApiError::bad_request("Invalid param!"));
    }
    Ok(())
}

fn ensure_non_empty(value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request("Invalid data!"));
    }
    Ok(())
}
