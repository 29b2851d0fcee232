use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Json<Vec<String>>,
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub difficulty: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

pub const QUESTION_DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

