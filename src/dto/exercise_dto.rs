use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::exercise::{Exercise, EXERCISE_DIFFICULTIES};
use crate::utils::validation::{not_blank, one_of};

fn validate_exercise_difficulty(value: &str) -> Result<(), ValidationError> {
    one_of(value, &EXERCISE_DIFFICULTIES, "difficulty")
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExercisePayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(custom(function = "validate_exercise_difficulty"))]
    pub difficulty: String,
    #[validate(length(min = 1, max = 50))]
    pub time_estimate: String,
    #[validate(length(min = 1, max = 50))]
    pub language: String,
    pub completed: Option<bool>,
    pub content: Option<String>,
    pub code: Option<String>,
    #[validate(range(min = 0))]
    pub time_spent: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateExercisePayload {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_exercise_difficulty"))]
    pub difficulty: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub time_estimate: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
    pub completed: Option<bool>,
    pub content: Option<String>,
    pub code: Option<String>,
    #[validate(range(min = 0))]
    pub time_spent: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub time_estimate: String,
    pub language: String,
    pub completed: bool,
    pub content: Option<String>,
    pub code: Option<String>,
    pub time_spent: Option<i32>,
}

impl From<Exercise> for ExerciseResponse {
    fn from(e: Exercise) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            difficulty: e.difficulty,
            time_estimate: e.time_estimate,
            language: e.language,
            completed: e.completed,
            content: e.content,
            code: e.code,
            time_spent: e.time_spent,
        }
    }
}
