pub mod comments;
pub mod exercises;
pub mod health;
pub mod quizzes;
pub mod snippets;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::get_config;
use crate::middleware::{
    auth::authenticate,
    cors::cors_layer,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

#[derive(OpenApi)]
#[openapi(paths(
    health::health,
    health::readiness,
    snippets::list_snippets,
    snippets::create_snippet,
    snippets::get_snippet,
    snippets::update_snippet,
    snippets::delete_snippet,
    snippets::toggle_saved,
    snippets::list_saved,
    comments::list_comments,
    comments::create_comment,
    comments::toggle_like,
    quizzes::list_quizzes,
    quizzes::create_quiz,
    quizzes::get_quiz,
    quizzes::update_quiz,
    quizzes::delete_quiz,
    quizzes::list_questions,
    quizzes::create_question,
    quizzes::submit_quiz,
    quizzes::list_results,
    exercises::list_exercises,
    exercises::create_exercise,
    exercises::get_exercise,
    exercises::update_exercise,
    exercises::delete_exercise,
))]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    let config = get_config();

    let api = Router::new()
        .route(
            "/api/v1/snippets",
            get(snippets::list_snippets).post(snippets::create_snippet),
        )
        .route("/api/v1/snippets/saved", get(snippets::list_saved))
        .route(
            "/api/v1/snippets/:id",
            get(snippets::get_snippet)
                .patch(snippets::update_snippet)
                .delete(snippets::delete_snippet),
        )
        .route("/api/v1/snippets/:id/save", post(snippets::toggle_saved))
        .route(
            "/api/v1/snippets/:id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/api/v1/snippets/:id/comments/:comment_id/like",
            post(comments::toggle_like),
        )
        .route(
            "/api/v1/quizzes",
            get(quizzes::list_quizzes).post(quizzes::create_quiz),
        )
        .route(
            "/api/v1/quizzes/:id",
            get(quizzes::get_quiz)
                .patch(quizzes::update_quiz)
                .delete(quizzes::delete_quiz),
        )
        .route(
            "/api/v1/quizzes/:id/questions",
            get(quizzes::list_questions).post(quizzes::create_question),
        )
        .route("/api/v1/quizzes/:id/submit", post(quizzes::submit_quiz))
        .route("/api/v1/quizzes/:id/results", get(quizzes::list_results))
        .route(
            "/api/v1/exercises",
            get(exercises::list_exercises).post(exercises::create_exercise),
        )
        .route(
            "/api/v1/exercises/:id",
            get(exercises::get_exercise)
                .patch(exercises::update_exercise)
                .delete(exercises::delete_exercise),
        )
        .layer(from_fn_with_state(
            RateLimiter::new(config.api_rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/api/openapi.json", get(openapi_json))
        .merge(api)
        .layer(from_fn(authenticate))
        .with_state(state)
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
}
