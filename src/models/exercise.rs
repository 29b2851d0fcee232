use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exercise {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub time_estimate: String,
    pub language: String,
    pub completed: bool,
    pub content: Option<String>,
    /// Milliseconds.
    pub time_spent: Option<i32>,
    pub code: Option<String>,
}

pub const EXERCISE_DIFFICULTIES: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];
