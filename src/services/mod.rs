pub mod comment_service;
pub mod exercise_service;
pub mod grading_service;
pub mod quiz_service;
pub mod snippet_service;
pub mod user_service;
