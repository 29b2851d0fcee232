use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeOutcome {
    pub total_score: i32,
    pub total_questions: usize,
    pub percentage: f64,
}

pub struct GradingService;

impl GradingService {
    /// Scores `answers` against the correct option indices of a quiz's
    /// questions, both in stored question order. Answers past the last
    /// question are ignored; a missing answer never matches.
    pub fn grade(correct_answers: &[i32], answers: &[Option<i64>]) -> GradeOutcome {
        let total_questions = correct_answers.len();
        let matches = correct_answers
            .iter()
            .zip(answers.iter())
            .filter(|(correct, given)| **given == Some(i64::from(**correct)))
            .count();

        let percentage = if total_questions == 0 {
            0.0
        } else {
            matches as f64 / total_questions as f64 * 100.0
        };

        GradeOutcome {
            total_score: matches as i32,
            total_questions,
            percentage,
        }
    }

    /// Reads one submitted answer as an option index. Only integral numbers
    /// qualify; strings, objects and `null` become `None`.
    pub fn normalize_answer(value: &JsonValue) -> Option<i64> {
        match value {
            JsonValue::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }

    pub fn normalize_answers(values: &[JsonValue]) -> Vec<Option<i64>> {
        values.iter().map(Self::normalize_answer).collect()
    }
}
