use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::quiz_dto::{
        CreateQuestionPayload, CreateQuizPayload, QuestionResponse, QuizResponse,
        QuizResultResponse, SubmitQuizPayload, UpdateQuizPayload,
    },
    error::Result,
    middleware::auth::AuthUser,
    services::grading_service::GradingService,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/quizzes",
    responses((status = 200, description = "Quizzes with their questions, newest first", body = [QuizResponse]))
)]
#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Vec<QuizResponse>>> {
    let quizzes = state.quiz_service.list().await?;
    Ok(Json(
        quizzes
            .into_iter()
            .map(|(quiz, questions)| QuizResponse::new(quiz, questions))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes",
    request_body = CreateQuizPayload,
    responses(
        (status = 201, description = "Quiz created with its questions", body = QuizResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (quiz, questions) = state.quiz_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(QuizResponse::new(quiz, questions))))
}

#[utoipa::path(
    get,
    path = "/api/v1/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz found", body = QuizResponse),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (quiz, questions) = state.quiz_service.get_with_questions(id).await?;
    Ok(Json(QuizResponse::new(quiz, questions)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    request_body = UpdateQuizPayload,
    responses(
        (status = 200, description = "Quiz updated", body = QuizResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn update_quiz(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let quiz = state.quiz_service.update(id, payload).await?;
    let questions = state.quiz_service.questions_for(id).await?;
    Ok(Json(QuizResponse::new(quiz, questions)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/quizzes/{id}",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 204, description = "Quiz and its questions and results deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_quiz(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.quiz_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/quizzes/{id}/questions",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Questions in answer order", body = [QuestionResponse]),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuestionResponse>>> {
    let questions = state.quiz_service.list_questions(id).await?;
    Ok(Json(
        questions.into_iter().map(QuestionResponse::from).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes/{id}/questions",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    request_body = CreateQuestionPayload,
    responses(
        (status = 201, description = "Question appended to the quiz", body = QuestionResponse),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateQuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state.quiz_service.add_question(id, payload).await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

#[utoipa::path(
    post,
    path = "/api/v1/quizzes/{id}/submit",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    request_body = SubmitQuizPayload,
    responses(
        (status = 201, description = "Submission graded and stored", body = QuizResultResponse),
        (status = 400, description = "answers missing"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let raw = payload.answers.unwrap_or_default();
    let answers = GradingService::normalize_answers(&raw);
    let result = state.quiz_service.submit(id, &answers).await?;
    Ok((StatusCode::CREATED, Json(QuizResultResponse::from(result))))
}

#[utoipa::path(
    get,
    path = "/api/v1/quizzes/{id}/results",
    params(("id" = Uuid, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Stored results, newest first", body = [QuizResultResponse]),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn list_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<QuizResultResponse>>> {
    let results = state.quiz_service.results_for(id).await?;
    Ok(Json(
        results.into_iter().map(QuizResultResponse::from).collect(),
    ))
}
