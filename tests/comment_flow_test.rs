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

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {}", t));
    }
    let req = match body {
        Some(b) => builder.body(Body::from(b.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, json_body(resp).await)
}

async fn create_snippet(app: &Router, token: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/snippets",
        Some(token),
        Some(json!({
            "title": "Two sum",
            "language": "Rust",
            "summary": "Hash map lookup",
            "snippet": "fn two_sum() {}",
            "tags": "arrays, hashing",
            "difficulty_level": "beginner"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn comment(app: &Router, token: &str, snippet_id: i64, text: &str, parent: Option<i64>) -> JsonValue {
    let (status, body) = send(
        app,
        "POST",
        &format!("/api/v1/snippets/{}/comments", snippet_id),
        Some(token),
        Some(json!({ "text": text, "discussion_id": "general", "parent": parent })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

async fn like(app: &Router, token: &str, snippet_id: i64, comment_id: i64) -> (StatusCode, JsonValue) {
    send(
        app,
        "POST",
        &format!("/api/v1/snippets/{}/comments/{}/like", snippet_id, comment_id),
        Some(token),
        None,
    )
    .await
}

#[tokio::test]
async fn thread_with_likes_and_a_reply() {
    let Some((app, _pool)) = db_app().await else { return };
    let author = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let fan_a = token_for(Uuid::new_v4(), "Alan", "Turing");
    let fan_b = token_for(Uuid::new_v4(), "Grace", "Hopper");
    let viewer = token_for(Uuid::new_v4(), "Linus", "Torvalds");

    let snippet_id = create_snippet(&app, &author).await;
    let c1 = comment(&app, &author, snippet_id, "Nice", None).await;
    let c1_id = c1["id"].as_i64().unwrap();
    assert_eq!(c1["first_name"], "Ada");
    assert_eq!(c1["like_count"], 0);

    like(&app, &fan_a, snippet_id, c1_id).await;
    like(&app, &fan_b, snippet_id, c1_id).await;
    let c2 = comment(&app, &fan_a, snippet_id, "Thanks", Some(c1_id)).await;
    assert_eq!(c2["parent"], c1_id);

    let (status, views) = send(
        &app,
        "GET",
        &format!("/api/v1/snippets/{}/comments", snippet_id),
        Some(&viewer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["id"], c1_id);
    assert_eq!(views[0]["like_count"], 2);
    assert_eq!(views[0]["is_liked"], false);
    let replies = views[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], c2["id"]);
    assert_eq!(replies[0]["first_name"], "Alan");
    assert!(replies[0]["replies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn liking_twice_restores_the_original_state() {
    let Some((app, _pool)) = db_app().await else { return };
    let author = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let snippet_id = create_snippet(&app, &author).await;
    let c1_id = comment(&app, &author, snippet_id, "Nice", None).await["id"]
        .as_i64()
        .unwrap();

    let (status, liked) = like(&app, &author, snippet_id, c1_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liked["like_count"], 1);
    assert_eq!(liked["is_liked"], true);

    let (_, unliked) = like(&app, &author, snippet_id, c1_id).await;
    assert_eq!(unliked["like_count"], 0);
    assert_eq!(unliked["is_liked"], false);
}

#[tokio::test]
async fn replies_to_replies_are_stored_but_not_rendered() {
    let Some((app, pool)) = db_app().await else { return };
    let author = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let snippet_id = create_snippet(&app, &author).await;
    let c1_id = comment(&app, &author, snippet_id, "Top", None).await["id"]
        .as_i64()
        .unwrap();
    let c2_id = comment(&app, &author, snippet_id, "Reply", Some(c1_id)).await["id"]
        .as_i64()
        .unwrap();
    comment(&app, &author, snippet_id, "Deep", Some(c2_id)).await;

    let stored: i64 = tokio_test::assert_ok!(
        sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE snippet_id = $1")
            .bind(snippet_id)
            .fetch_one(&pool)
            .await
    );
    assert_eq!(stored, 3);

    let (_, views) = send(
        &app,
        "GET",
        &format!("/api/v1/snippets/{}/comments", snippet_id),
        None,
        None,
    )
    .await;
    let views = views.as_array().unwrap();
    assert_eq!(views.len(), 1);
    let replies = views[0]["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["id"], c2_id);
    assert!(replies[0]["replies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn anonymous_viewer_never_sees_a_like_as_their_own() {
    let Some((app, _pool)) = db_app().await else { return };
    let author = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let snippet_id = create_snippet(&app, &author).await;
    let c1_id = comment(&app, &author, snippet_id, "Nice", None).await["id"]
        .as_i64()
        .unwrap();
    like(&app, &author, snippet_id, c1_id).await;

    let (_, views) = send(
        &app,
        "GET",
        &format!("/api/v1/snippets/{}/comments", snippet_id),
        None,
        None,
    )
    .await;
    assert_eq!(views[0]["like_count"], 1);
    assert_eq!(views[0]["is_liked"], false);
}

#[tokio::test]
async fn comments_do_not_cross_snippets() {
    let Some((app, _pool)) = db_app().await else { return };
    let author = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let first = create_snippet(&app, &author).await;
    let second = create_snippet(&app, &author).await;
    let c1_id = comment(&app, &author, first, "On the first", None).await["id"]
        .as_i64()
        .unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/snippets/{}/comments", second),
        Some(&author),
        Some(json!({ "text": "Misplaced reply", "parent": c1_id })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = like(&app, &author, second, c1_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/snippets/999999999/comments",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Snippet not found");
}

#[tokio::test]
async fn saving_a_snippet_toggles() {
    let Some((app, _pool)) = db_app().await else { return };
    let user = token_for(Uuid::new_v4(), "Ada", "Lovelace");
    let snippet_id = create_snippet(&app, &user).await;
    let uri = format!("/api/v1/snippets/{}/save", snippet_id);

    let (status, first) = send(&app, "POST", &uri, Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["saved"], true);

    let (_, saved) = send(&app, "GET", "/api/v1/snippets/saved", Some(&user), None).await;
    let ids: Vec<i64> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![snippet_id]);
    assert_eq!(saved[0]["tags"], json!(["arrays", "hashing"]));

    let (_, second) = send(&app, "POST", &uri, Some(&user), None).await;
    assert_eq!(second["saved"], false);
}
