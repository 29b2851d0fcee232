pub mod comment;
pub mod exercise;
pub mod question;
pub mod quiz;
pub mod quiz_result;
pub mod snippet;
pub mod user;
