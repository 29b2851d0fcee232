use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::question::{Question, QUESTION_DIFFICULTIES};
use crate::models::quiz::Quiz;
use crate::models::quiz_result::QuizResult;
use crate::utils::validation::{not_blank, one_of};

fn validate_question_difficulty(value: &str) -> Result<(), ValidationError> {
    one_of(value, &QUESTION_DIFFICULTIES, "difficulty")
}

fn validate_answer_index(payload: &CreateQuestionPayload) -> Result<(), ValidationError> {
    let index = payload.correct_answer;
    if index < 0 || index as usize >= payload.options.len() {
        let mut err = ValidationError::new("correct_answer_out_of_range");
        err.message = Some(
            format!(
                "correct_answer {} does not reference one of {} options",
                index,
                payload.options.len()
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_answer_index"))]
pub struct CreateQuestionPayload {
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    // Rendered as choices A-D.
    #[validate(length(min = 1, max = 4))]
    pub options: Vec<String>,
    #[validate(range(min = 0, max = 3))]
    pub correct_answer: i32,
    pub explanation: Option<String>,
    #[validate(custom(function = "validate_question_difficulty"))]
    pub difficulty: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<CreateQuestionPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateQuizPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
}

/// Answers are positional: `answers[i]` is the option index chosen for the
/// i-th question. Entries may be `null` for skipped questions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitQuizPayload {
    #[validate(required)]
    pub answers: Option<Vec<JsonValue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub difficulty: String,
    pub category: String,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            options: q.options.0,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
            difficulty: q.difficulty,
            category: q.category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub questions: Vec<QuestionResponse>,
    pub created_at: DateTime<Utc>,
}

impl QuizResponse {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            category: quiz.category,
            questions: questions.into_iter().map(QuestionResponse::from).collect(),
            created_at: quiz.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultResponse {
    pub id: Uuid,
    pub quiz: Uuid,
    pub total_score: i32,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}

impl From<QuizResult> for QuizResultResponse {
    fn from(r: QuizResult) -> Self {
        Self {
            id: r.id,
            quiz: r.quiz_id,
            total_score: r.total_score,
            percentage: r.percentage,
            created_at: r.created_at,
        }
    }
}
