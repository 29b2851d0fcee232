use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::snippet_dto::{
        CreateSnippetPayload, SaveToggleResponse, SnippetListQuery, SnippetListResponse,
        SnippetResponse, UpdateSnippetPayload,
    },
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/snippets",
    params(
        ("page" = Option<i64>, Query, description = "Page number, from 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, at most 100"),
        ("language" = Option<String>, Query, description = "Case-insensitive language filter"),
        ("difficulty_level" = Option<String>, Query, description = "beginner, intermediate or advanced"),
        ("search" = Option<String>, Query, description = "Matches title or summary"),
        ("include_private" = Option<bool>, Query, description = "Also list non-public snippets")
    ),
    responses(
        (status = 200, description = "Snippets ordered by title", body = SnippetListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_snippets(
    State(state): State<AppState>,
    Query(query): Query<SnippetListQuery>,
) -> Result<impl IntoResponse> {
    let list = state.snippet_service.list(query).await?;
    Ok(Json(SnippetListResponse::from(list)))
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets",
    request_body = CreateSnippetPayload,
    responses(
        (status = 201, description = "Snippet created", body = SnippetResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn create_snippet(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateSnippetPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let snippet = state.snippet_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(SnippetResponse::from(snippet))))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "Snippet found", body = SnippetResponse),
        (status = 404, description = "Snippet not found")
    )
)]
#[axum::debug_handler]
pub async fn get_snippet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let snippet = state.snippet_service.get_by_id(id).await?;
    Ok(Json(SnippetResponse::from(snippet)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet ID")),
    request_body = UpdateSnippetPayload,
    responses(
        (status = 200, description = "Snippet updated", body = SnippetResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Snippet not found")
    )
)]
#[axum::debug_handler]
pub async fn update_snippet(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSnippetPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let snippet = state.snippet_service.update(id, payload).await?;
    Ok(Json(SnippetResponse::from(snippet)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/snippets/{id}",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 204, description = "Snippet deleted"),
        (status = 404, description = "Snippet not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_snippet(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.snippet_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets/{id}/save",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "Saved state after the toggle", body = SaveToggleResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Snippet not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_saved(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.user_service.sync(&user).await?;
    let saved = state.snippet_service.toggle_saved(id, user.id).await?;
    Ok(Json(SaveToggleResponse {
        snippet_id: id,
        saved,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/snippets/saved",
    responses(
        (status = 200, description = "The caller's saved snippets, newest first", body = [SnippetResponse]),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_saved(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse> {
    let items = state.snippet_service.list_saved(user.id).await?;
    let body: Vec<SnippetResponse> = items.into_iter().map(SnippetResponse::from).collect();
    Ok(Json(body))
}
