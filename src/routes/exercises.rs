use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::exercise_dto::{CreateExercisePayload, ExerciseResponse, UpdateExercisePayload},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/exercises",
    responses((status = 200, description = "All exercises", body = [ExerciseResponse]))
)]
#[axum::debug_handler]
pub async fn list_exercises(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExerciseResponse>>> {
    let items = state.exercise_service.list().await?;
    Ok(Json(items.into_iter().map(ExerciseResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/exercises",
    request_body = CreateExercisePayload,
    responses(
        (status = 201, description = "Exercise created", body = ExerciseResponse),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_exercise(
    State(state): State<AppState>,
    Json(payload): Json<CreateExercisePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let exercise = state.exercise_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ExerciseResponse::from(exercise))))
}

#[utoipa::path(
    get,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise ID")),
    responses(
        (status = 200, description = "Exercise found", body = ExerciseResponse),
        (status = 404, description = "Exercise not found")
    )
)]
#[axum::debug_handler]
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let exercise = state.exercise_service.get_by_id(id).await?;
    Ok(Json(ExerciseResponse::from(exercise)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise ID")),
    request_body = UpdateExercisePayload,
    responses(
        (status = 200, description = "Exercise updated", body = ExerciseResponse),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Exercise not found")
    )
)]
#[axum::debug_handler]
pub async fn update_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExercisePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let exercise = state.exercise_service.update(id, payload).await?;
    Ok(Json(ExerciseResponse::from(exercise)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/exercises/{id}",
    params(("id" = i64, Path, description = "Exercise ID")),
    responses(
        (status = 204, description = "Exercise deleted"),
        (status = 404, description = "Exercise not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.exercise_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
