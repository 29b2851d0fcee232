use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::snippet_dto::{CreateSnippetPayload, SnippetListQuery, UpdateSnippetPayload};
use crate::error::{Error, Result};
use crate::models::snippet::Snippet;

const SNIPPET_COLUMNS: &str = r#"
    id, title, language, summary, snippet, tags, difficulty_level,
    is_public, created_at, updated_at
"#;

pub struct SnippetList {
    pub items: Vec<Snippet>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Clone)]
pub struct SnippetService {
    pool: PgPool,
}

impl SnippetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateSnippetPayload) -> Result<Snippet> {
        let difficulty = payload
            .difficulty_level
            .unwrap_or_else(|| "beginner".to_string());

        let snippet = sqlx::query_as::<_, Snippet>(&format!(
            r#"
            INSERT INTO snippets (title, language, summary, snippet, tags, difficulty_level, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SNIPPET_COLUMNS}
            "#
        ))
        .bind(payload.title.trim())
        .bind(payload.language.trim())
        .bind(payload.summary)
        .bind(payload.snippet)
        .bind(Json(payload.tags))
        .bind(difficulty)
        .bind(payload.is_public.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(snippet_id = snippet.id, "snippet created");
        Ok(snippet)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Snippet> {
        sqlx::query_as::<_, Snippet>(&format!(
            "SELECT {SNIPPET_COLUMNS} FROM snippets WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Snippet not found".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateSnippetPayload) -> Result<Snippet> {
        sqlx::query_as::<_, Snippet>(&format!(
            r#"
            UPDATE snippets
            SET
                title = COALESCE($1, title),
                language = COALESCE($2, language),
                summary = COALESCE($3, summary),
                snippet = COALESCE($4, snippet),
                tags = COALESCE($5, tags),
                difficulty_level = COALESCE($6, difficulty_level),
                is_public = COALESCE($7, is_public),
                updated_at = NOW()
            WHERE id = $8
            RETURNING {SNIPPET_COLUMNS}
            "#
        ))
        .bind(payload.title.as_deref().map(str::trim))
        .bind(payload.language.as_deref().map(str::trim))
        .bind(payload.summary)
        .bind(payload.snippet)
        .bind(payload.tags.map(Json))
        .bind(payload.difficulty_level)
        .bind(payload.is_public)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Snippet not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Snippet not found".to_string()));
        }
        tracing::info!(snippet_id = id, "snippet deleted");
        Ok(())
    }

    pub async fn list(&self, query: SnippetListQuery) -> Result<SnippetList> {
        let (page, per_page, offset) = page_window(query.page, query.per_page);
        let include_private = query.include_private.unwrap_or(false);
        let search = query.search.as_deref().map(contains_pattern);

        let filter = r#"
            WHERE ($1::bool OR is_public)
              AND ($2::text IS NULL OR LOWER(language) = LOWER($2))
              AND ($3::text IS NULL OR difficulty_level = $3)
              AND ($4::text IS NULL OR (title ILIKE $4 ESCAPE '\' OR summary ILIKE $4 ESCAPE '\'))
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM snippets {filter}"))
            .bind(include_private)
            .bind(query.language.as_deref())
            .bind(query.difficulty_level.as_deref())
            .bind(search.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Snippet>(&format!(
            r#"
            SELECT {SNIPPET_COLUMNS} FROM snippets
            {filter}
            ORDER BY title ASC, id ASC
            LIMIT $5 OFFSET $6
            "#
        ))
        .bind(include_private)
        .bind(query.language.as_deref())
        .bind(query.difficulty_level.as_deref())
        .bind(search.as_deref())
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(SnippetList {
            items,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Flips the snippet's membership in the user's saved set and reports
    /// whether it is saved afterwards.
    pub async fn toggle_saved(&self, snippet_id: i64, user_id: Uuid) -> Result<bool> {
        self.get_by_id(snippet_id).await?;

        let removed = sqlx::query("DELETE FROM saved_snippets WHERE user_id = $1 AND snippet_id = $2")
            .bind(user_id)
            .bind(snippet_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if removed > 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO saved_snippets (user_id, snippet_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, snippet_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(snippet_id)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    pub async fn list_saved(&self, user_id: Uuid) -> Result<Vec<Snippet>> {
        let items = sqlx::query_as::<_, Snippet>(
            r#"
            SELECT s.id, s.title, s.language, s.summary, s.snippet, s.tags,
                   s.difficulty_level, s.is_public, s.created_at, s.updated_at
            FROM saved_snippets ss
            JOIN snippets s ON s.id = ss.snippet_id
            WHERE ss.user_id = $1
            ORDER BY ss.created_at DESC, s.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// Normalizes client paging into `(page, per_page, offset)`. The offset
/// saturates so an absurd page number yields an empty page.
fn page_window(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1).saturating_mul(per_page);
    (page, per_page, offset)
}

/// `ILIKE` pattern matching `term` literally anywhere in the column.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page > 0 {
        ((total as f64) / (per_page as f64)).ceil() as i64
    } else {
        1
    }
}
