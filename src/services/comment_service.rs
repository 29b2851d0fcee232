use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::comment_dto::{CommentView, CreateCommentPayload};
use crate::error::{Error, Result};
use crate::models::comment::CommentRecord;
use crate::utils::time::to_display;

/// A snippet's comments, indexed by parent id. Rebuilt from the flat rows on
/// every call; nothing here outlives a request.
///
/// Rendering stops at two levels: top-level comments carry their direct
/// replies, and a reply's own `replies` is always empty even when deeper
/// rows point at it.
pub struct CommentThread {
    records: Vec<CommentRecord>,
    replies_by_parent: HashMap<i64, Vec<usize>>,
}

impl CommentThread {
    pub fn new(mut records: Vec<CommentRecord>) -> Self {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let mut replies_by_parent: HashMap<i64, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            if let Some(parent_id) = record.parent_id {
                replies_by_parent.entry(parent_id).or_default().push(idx);
            }
        }

        Self {
            records,
            replies_by_parent,
        }
    }

    /// Top-level comments, newest first.
    pub fn top_level(&self, viewer: Option<Uuid>) -> Vec<CommentView> {
        self.records
            .iter()
            .filter(|r| !r.is_reply())
            .map(|r| self.render_record(r, viewer))
            .collect()
    }

    pub fn render(&self, comment_id: i64, viewer: Option<Uuid>) -> Option<CommentView> {
        self.records
            .iter()
            .find(|r| r.id == comment_id)
            .map(|r| self.render_record(r, viewer))
    }

    fn render_record(&self, record: &CommentRecord, viewer: Option<Uuid>) -> CommentView {
        let replies = if record.is_reply() {
            Vec::new()
        } else {
            self.replies_by_parent
                .get(&record.id)
                .map(|indices| {
                    indices
                        .iter()
                        .map(|&idx| to_view(&self.records[idx], viewer, Vec::new()))
                        .collect()
                })
                .unwrap_or_default()
        };
        to_view(record, viewer, replies)
    }
}

fn to_view(record: &CommentRecord, viewer: Option<Uuid>, replies: Vec<CommentView>) -> CommentView {
    CommentView {
        id: record.id,
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        text: record.text.clone(),
        title: record.title.clone(),
        discussion_id: record.discussion_id.clone(),
        parent: record.parent_id,
        date: to_display(record.created_at),
        like_count: record.liked_by.len() as i64,
        is_liked: viewer.map_or(false, |user_id| record.is_liked_by(user_id)),
        replies,
    }
}

#[derive(Clone)]
pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_snippet(
        &self,
        snippet_id: i64,
        viewer: Option<Uuid>,
    ) -> Result<Vec<CommentView>> {
        self.ensure_snippet(snippet_id).await?;
        let records = self.fetch_records(snippet_id).await?;
        Ok(CommentThread::new(records).top_level(viewer))
    }

    pub async fn create(
        &self,
        snippet_id: i64,
        user_id: Uuid,
        payload: CreateCommentPayload,
    ) -> Result<CommentView> {
        self.ensure_snippet(snippet_id).await?;

        if let Some(parent_id) = payload.parent {
            if !self.comment_exists(snippet_id, parent_id).await? {
                return Err(Error::NotFound("Parent comment not found".to_string()));
            }
        }

        let comment_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (snippet_id, user_id, parent_id, text, title, discussion_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(snippet_id)
        .bind(user_id)
        .bind(payload.parent)
        .bind(payload.text.trim())
        .bind(payload.title)
        .bind(payload.discussion_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(snippet_id, comment_id, %user_id, "comment created");
        self.render_one(snippet_id, comment_id, Some(user_id)).await
    }

    /// Adds `user_id` to the comment's likes, or removes it if already there.
    pub async fn toggle_like(
        &self,
        snippet_id: i64,
        comment_id: i64,
        user_id: Uuid,
    ) -> Result<CommentView> {
        if !self.comment_exists(snippet_id, comment_id).await? {
            return Err(Error::NotFound("Comment not found".to_string()));
        }

        let removed = sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
            .bind(comment_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if removed == 0 {
            sqlx::query(
                r#"
                INSERT INTO comment_likes (comment_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT (comment_id, user_id) DO NOTHING
                "#,
            )
            .bind(comment_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        }

        tracing::debug!(comment_id, %user_id, liked = removed == 0, "comment like toggled");
        self.render_one(snippet_id, comment_id, Some(user_id)).await
    }

    async fn render_one(
        &self,
        snippet_id: i64,
        comment_id: i64,
        viewer: Option<Uuid>,
    ) -> Result<CommentView> {
        let records = self.fetch_records(snippet_id).await?;
        CommentThread::new(records)
            .render(comment_id, viewer)
            .ok_or_else(|| Error::NotFound("Comment not found".to_string()))
    }

    async fn fetch_records(&self, snippet_id: i64) -> Result<Vec<CommentRecord>> {
        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT
                c.id,
                c.snippet_id,
                c.parent_id,
                c.user_id,
                u.first_name,
                u.last_name,
                c.text,
                c.title,
                c.discussion_id,
                c.created_at,
                COALESCE(
                    ARRAY_AGG(cl.user_id) FILTER (WHERE cl.user_id IS NOT NULL),
                    ARRAY[]::uuid[]
                ) AS liked_by
            FROM comments c
            JOIN users u ON u.id = c.user_id
            LEFT JOIN comment_likes cl ON cl.comment_id = c.id
            WHERE c.snippet_id = $1
            GROUP BY c.id, u.id
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(snippet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn ensure_snippet(&self, snippet_id: i64) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM snippets WHERE id = $1)")
            .bind(snippet_id)
            .fetch_one(&self.pool)
            .await?;
        if exists {
            Ok(())
        } else {
            Err(Error::NotFound("Snippet not found".to_string()))
        }
    }

    async fn comment_exists(&self, snippet_id: i64, comment_id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND snippet_id = $2)",
        )
        .bind(comment_id)
        .bind(snippet_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
