use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::quiz_dto::{CreateQuestionPayload, CreateQuizPayload, UpdateQuizPayload};
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::quiz_result::QuizResult;
use crate::services::grading_service::GradingService;

const QUESTION_COLUMNS: &str = r#"
    id, quiz_id, question, options, correct_answer, explanation,
    difficulty, category, created_at
"#;

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the quiz and its questions in one transaction; question order
    /// follows the payload.
    pub async fn create(&self, payload: CreateQuizPayload) -> Result<(Quiz, Vec<Question>)> {
        let mut tx = self.pool.begin().await?;

        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (id, title, description, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, category, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(payload.category.trim())
        .fetch_one(&mut *tx)
        .await?;

        let mut questions = Vec::with_capacity(payload.questions.len());
        for question in payload.questions {
            questions.push(insert_question(&mut tx, quiz.id, question).await?);
        }

        tx.commit().await?;
        tracing::info!(quiz_id = %quiz.id, questions = questions.len(), "quiz created");
        Ok((quiz, questions))
    }

    pub async fn list(&self) -> Result<Vec<(Quiz, Vec<Question>)>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM quizzes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = quizzes.iter().map(|q| q.id).collect();
        let all_questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = ANY($1) ORDER BY id ASC"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes
            .into_iter()
            .map(|quiz| {
                let questions = all_questions
                    .iter()
                    .filter(|q| q.quiz_id == quiz.id)
                    .cloned()
                    .collect();
                (quiz, questions)
            })
            .collect())
    }

    pub async fn get_by_id(&self, quiz_id: Uuid) -> Result<Quiz> {
        sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn get_with_questions(&self, quiz_id: Uuid) -> Result<(Quiz, Vec<Question>)> {
        let quiz = self.get_by_id(quiz_id).await?;
        let questions = self.questions_for(quiz_id).await?;
        Ok((quiz, questions))
    }

    pub async fn update(&self, quiz_id: Uuid, payload: UpdateQuizPayload) -> Result<Quiz> {
        sqlx::query_as::<_, Quiz>(
            r#"
            UPDATE quizzes
            SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                category = COALESCE($3, category),
                updated_at = NOW()
            WHERE id = $4
            RETURNING id, title, description, category, created_at, updated_at
            "#,
        )
        .bind(payload.title.as_deref().map(str::trim))
        .bind(payload.description)
        .bind(payload.category.as_deref().map(str::trim))
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    pub async fn delete(&self, quiz_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Quiz not found".to_string()));
        }
        tracing::info!(%quiz_id, "quiz deleted");
        Ok(())
    }

    /// Questions in stored order, which is the order answers are matched in.
    pub async fn questions_for(&self, quiz_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE quiz_id = $1 ORDER BY id ASC"
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    pub async fn list_questions(&self, quiz_id: Uuid) -> Result<Vec<Question>> {
        self.get_by_id(quiz_id).await?;
        self.questions_for(quiz_id).await
    }

    pub async fn add_question(
        &self,
        quiz_id: Uuid,
        payload: CreateQuestionPayload,
    ) -> Result<Question> {
        self.get_by_id(quiz_id).await?;
        let mut tx = self.pool.begin().await?;
        let question = insert_question(&mut tx, quiz_id, payload).await?;
        tx.commit().await?;
        Ok(question)
    }

    /// Grades a submission and stores the result. Each call creates a new
    /// result row, even for an identical submission.
    pub async fn submit(&self, quiz_id: Uuid, answers: &[Option<i64>]) -> Result<QuizResult> {
        let questions = self.list_questions(quiz_id).await?;
        let correct: Vec<i32> = questions.iter().map(|q| q.correct_answer).collect();
        let outcome = GradingService::grade(&correct, answers);

        let result = sqlx::query_as::<_, QuizResult>(
            r#"
            INSERT INTO quiz_results (id, quiz_id, total_score, percentage)
            VALUES ($1, $2, $3, $4)
            RETURNING id, quiz_id, total_score, percentage, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(quiz_id)
        .bind(outcome.total_score)
        .bind(outcome.percentage)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            %quiz_id,
            result_id = %result.id,
            score = outcome.total_score,
            total = outcome.total_questions,
            "quiz submission graded"
        );
        Ok(result)
    }

    pub async fn results_for(&self, quiz_id: Uuid) -> Result<Vec<QuizResult>> {
        self.get_by_id(quiz_id).await?;
        let results = sqlx::query_as::<_, QuizResult>(
            r#"
            SELECT id, quiz_id, total_score, percentage, created_at
            FROM quiz_results
            WHERE quiz_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(results)
    }
}

async fn insert_question(
    tx: &mut Transaction<'_, Postgres>,
    quiz_id: Uuid,
    payload: CreateQuestionPayload,
) -> Result<Question> {
    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        INSERT INTO questions (quiz_id, question, options, correct_answer, explanation, difficulty, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {QUESTION_COLUMNS}
        "#
    ))
    .bind(quiz_id)
    .bind(payload.question)
    .bind(Json(payload.options))
    .bind(payload.correct_answer)
    .bind(payload.explanation)
    .bind(payload.difficulty)
    .bind(payload.category.trim())
    .fetch_one(&mut **tx)
    .await?;
    Ok(question)
}
