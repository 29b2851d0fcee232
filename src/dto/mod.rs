pub mod comment_dto;
pub mod exercise_dto;
pub mod quiz_dto;
pub mod snippet_dto;
