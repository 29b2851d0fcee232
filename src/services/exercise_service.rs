use sqlx::PgPool;

use crate::dto::exercise_dto::{CreateExercisePayload, UpdateExercisePayload};
use crate::error::{Error, Result};
use crate::models::exercise::Exercise;

const EXERCISE_COLUMNS: &str = r#"
    id, title, description, difficulty, time_estimate, language,
    completed, content, code, time_spent
"#;

#[derive(Clone)]
pub struct ExerciseService {
    pool: PgPool,
}

impl ExerciseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateExercisePayload) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(&format!(
            r#"
            INSERT INTO exercises (
                title, description, difficulty, time_estimate, language,
                completed, content, code, time_spent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {EXERCISE_COLUMNS}
            "#
        ))
        .bind(payload.title.trim())
        .bind(payload.description)
        .bind(payload.difficulty)
        .bind(payload.time_estimate)
        .bind(payload.language)
        .bind(payload.completed.unwrap_or(false))
        .bind(payload.content)
        .bind(payload.code)
        .bind(payload.time_spent)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(exercise_id = exercise.id, "exercise created");
        Ok(exercise)
    }

    pub async fn list(&self) -> Result<Vec<Exercise>> {
        let items = sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Exercise> {
        sqlx::query_as::<_, Exercise>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Exercise not found".to_string()))
    }

    pub async fn update(&self, id: i64, payload: UpdateExercisePayload) -> Result<Exercise> {
        sqlx::query_as::<_, Exercise>(&format!(
            r#"
            UPDATE exercises
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                difficulty = COALESCE($3, difficulty),
                time_estimate = COALESCE($4, time_estimate),
                language = COALESCE($5, language),
                completed = COALESCE($6, completed),
                content = COALESCE($7, content),
                code = COALESCE($8, code),
                time_spent = COALESCE($9, time_spent)
            WHERE id = $10
            RETURNING {EXERCISE_COLUMNS}
            "#
        ))
        .bind(payload.title.as_deref().map(str::trim))
        .bind(payload.description)
        .bind(payload.difficulty)
        .bind(payload.time_estimate)
        .bind(payload.language)
        .bind(payload.completed)
        .bind(payload.content)
        .bind(payload.code)
        .bind(payload.time_spent)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Exercise not found".to_string()))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Exercise not found".to_string()));
        }
        Ok(())
    }
}
