pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    comment_service::CommentService, exercise_service::ExerciseService,
    quiz_service::QuizService, snippet_service::SnippetService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub snippet_service: SnippetService,
    pub comment_service: CommentService,
    pub quiz_service: QuizService,
    pub exercise_service: ExerciseService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            snippet_service: SnippetService::new(pool.clone()),
            comment_service: CommentService::new(pool.clone()),
            quiz_service: QuizService::new(pool.clone()),
            exercise_service: ExerciseService::new(pool.clone()),
            user_service: UserService::new(pool.clone()),
            pool,
        }
    }
}
