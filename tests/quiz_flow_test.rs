mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

use common::{db_app, json_body, token_for};

async fn send(app: &Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let token = token_for(Uuid::new_v4(), "Quiz", "Author");
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token));
    let req = match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    if status == StatusCode::NO_CONTENT {
        return (status, JsonValue::Null);
    }
    (status, json_body(resp).await)
}

fn question(text: &str, correct_answer: i64) -> JsonValue {
    json!({
        "question": text,
        "options": ["A", "B", "C", "D"],
        "correct_answer": correct_answer,
        "difficulty": "medium",
        "category": "rust"
    })
}

async fn create_quiz(app: &Router, correct: &[i64]) -> String {
    let questions: Vec<JsonValue> = correct
        .iter()
        .enumerate()
        .map(|(i, c)| question(&format!("Question {}", i + 1), *c))
        .collect();
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/quizzes",
        Some(json!({
            "title": "Ownership basics",
            "description": "Moves and borrows",
            "category": "rust",
            "questions": questions
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn partial_submission_scores_two_of_three() {
    let Some((app, _pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[0, 2, 1]).await;

    let (status, result) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/submit", quiz_id),
        Some(json!({ "answers": [0, 2, 3] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(result["quiz"], quiz_id.as_str());
    assert_eq!(result["total_score"], 2);
    let percentage = result["percentage"].as_f64().unwrap();
    assert!((percentage - 66.67).abs() < 0.01);
}

#[tokio::test]
async fn perfect_and_repeated_submissions_are_all_stored() {
    let Some((app, _pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[1, 3]).await;
    let uri = format!("/api/v1/quizzes/{}/submit", quiz_id);

    for _ in 0..2 {
        let (status, result) = send(&app, "POST", &uri, Some(json!({ "answers": [1, 3] }))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(result["total_score"], 2);
        assert_eq!(result["percentage"].as_f64().unwrap(), 100.0);
    }

    let (status, results) = send(
        &app,
        "GET",
        &format!("/api/v1/quizzes/{}/results", quiz_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_ne!(results[0]["id"], results[1]["id"]);
}

#[tokio::test]
async fn empty_quiz_grades_to_zero() {
    let Some((app, _pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[]).await;

    let (status, result) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/submit", quiz_id),
        Some(json!({ "answers": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(result["total_score"], 0);
    assert_eq!(result["percentage"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn skipped_and_non_numeric_answers_do_not_score() {
    let Some((app, _pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[2, 0, 1, 3]).await;

    let (_, result) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/submit", quiz_id),
        Some(json!({ "answers": [2, null, "1"] })),
    )
    .await;
    assert_eq!(result["total_score"], 1);
    assert_eq!(result["percentage"].as_f64().unwrap(), 25.0);
}

#[tokio::test]
async fn questions_are_returned_in_answer_order() {
    let Some((app, _pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[0, 1]).await;

    let (status, added) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/questions", quiz_id),
        Some(question("Question 3", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["correct_answer"], 2);

    let (_, questions) = send(
        &app,
        "GET",
        &format!("/api/v1/quizzes/{}/questions", quiz_id),
        None,
    )
    .await;
    let texts: Vec<&str> = questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Question 1", "Question 2", "Question 3"]);
}

#[tokio::test]
async fn unknown_quiz_is_not_found() {
    let Some((app, _pool)) = db_app().await else { return };
    let missing = Uuid::new_v4();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/quizzes/{}/submit", missing),
        Some(json!({ "answers": [0] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Quiz not found");

    let (status, _) = send(&app, "GET", &format!("/api/v1/quizzes/{}/results", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_quiz_removes_it() {
    let Some((app, pool)) = db_app().await else { return };
    let quiz_id = create_quiz(&app, &[0]).await;
    let uri = format!("/api/v1/quizzes/{}", quiz_id);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining: i64 = tokio_test::assert_ok!(
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE quiz_id = $1")
            .bind(Uuid::parse_str(&quiz_id).unwrap())
            .fetch_one(&pool)
            .await
    );
    assert_eq!(remaining, 0);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
