use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Snippet {
    pub id: i64,
    pub title: String,
    pub language: String,
    pub summary: String,
    pub snippet: String,
    pub tags: Json<Vec<String>>,
    pub difficulty_level: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DIFFICULTY_LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];
