use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizResult {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub total_score: i32,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}
