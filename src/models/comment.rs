use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// One comment row joined with its author's name and the ids of every user
/// who liked it.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub snippet_id: i64,
    pub parent_id: Option<i64>,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub text: String,
    pub title: Option<String>,
    pub discussion_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub liked_by: Vec<Uuid>,
}

impl CommentRecord {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.liked_by.contains(&user_id)
    }
}
