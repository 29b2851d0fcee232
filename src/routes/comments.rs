use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::comment_dto::{CommentView, CreateCommentPayload},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/snippets/{id}/comments",
    params(("id" = i64, Path, description = "Snippet ID")),
    responses(
        (status = 200, description = "Top-level comments with their replies, newest first", body = [CommentView]),
        (status = 404, description = "Snippet not found")
    )
)]
#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(snippet_id): Path<i64>,
) -> Result<Json<Vec<CommentView>>> {
    let views = state
        .comment_service
        .list_for_snippet(snippet_id, viewer.map(|u| u.id))
        .await?;
    Ok(Json(views))
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets/{id}/comments",
    params(("id" = i64, Path, description = "Snippet ID")),
    request_body = CreateCommentPayload,
    responses(
        (status = 201, description = "Comment or reply created", body = CommentView),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Snippet or parent comment not found")
    )
)]
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(snippet_id): Path<i64>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    state.user_service.sync(&user).await?;
    let view = state
        .comment_service
        .create(snippet_id, user.id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    post,
    path = "/api/v1/snippets/{id}/comments/{comment_id}/like",
    params(
        ("id" = i64, Path, description = "Snippet ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment after the like was toggled", body = CommentView),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Comment not found for this snippet")
    )
)]
#[axum::debug_handler]
pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path((snippet_id, comment_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse> {
    state.user_service.sync(&user).await?;
    let view = state
        .comment_service
        .toggle_like(snippet_id, comment_id, user.id)
        .await?;
    Ok(Json(view))
}
