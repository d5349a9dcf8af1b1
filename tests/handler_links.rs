mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use tinylink::utils::code_generator::is_valid_code;

#[tokio::test]
async fn test_create_link_generated_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let code = body["code"].as_str().unwrap();

    assert!(is_valid_code(code));
    assert_eq!(code.len(), 6);
    assert_eq!(body["target_url"], "https://example.com");
    assert_eq!(body["clicks"], 0);
    assert!(body["last_clicked"].is_null());
    assert!(body["created_at"].is_string());
    assert_eq!(body["short_url"], format!("https://s.test/{code}"));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn test_create_link_custom_code() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com/a", "code": "Promo2024" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "invalid_code_format"
    );

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com/a", "code": "Promo24" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["code"], "Promo24");
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    for url in ["javascript:alert(1)", "/x", "not a url", "ftp://example.com"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "target_url": url }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    }

    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.post("/api/links").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_create_link_duplicate_custom_code() {
    let (state, repo) = common::create_test_state();
    repo.seed("abc123", "https://first.example.com");
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://second.example.com", "code": "abc123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "code_conflict");
    assert_eq!(body["error"]["details"]["code"], "abc123");

    assert_eq!(
        repo.get("abc123").unwrap().target_url,
        "https://first.example.com"
    );
}

#[tokio::test]
async fn test_create_link_reserved_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com", "code": "healthz" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    server
        .post("/api/links")
        .json(&json!({ "target_url": "https://a.example.com", "code": "linkAAA" }))
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/links")
        .json(&json!({ "target_url": "https://b.example.com", "code": "linkBBB" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/api/links").await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    let codes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();

    assert_eq!(codes, vec!["linkBBB", "linkAAA"]);
}

#[tokio::test]
async fn test_list_links_empty() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_get_link_does_not_count_click() {
    let (state, repo) = common::create_test_state();
    repo.seed("getme12", "https://example.com");
    let server = common::test_server(state);

    let response = server.get("/api/links/getme12").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["code"], "getme12");
    assert_eq!(repo.get("getme12").unwrap().clicks, 0);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/links/zzzzzzz9").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_link() {
    let (state, repo) = common::create_test_state();
    repo.seed("delme12", "https://example.com");
    let server = common::test_server(state);

    let response = server.delete("/api/links/delme12").await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["message"], "Link deleted successfully");
    assert_eq!(body["link"]["code"], "delme12");
    assert!(repo.get("delme12").is_none());

    let response = server.delete("/api/links/delme12").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (state, repo) = common::create_test_state();
    repo.seed("reuse12", "https://old.example.com");
    let server = common::test_server(state);

    server
        .delete("/api/links/reuse12")
        .await
        .assert_status_ok();

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://new.example.com", "code": "reuse12" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["clicks"], 0);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let server = common::test_server(common::create_unavailable_state());

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "internal_error");
    assert_eq!(body["error"]["details"]["retryable"], true);

    let response = server.get("/api/links/abc123").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_link_rejects_control_characters() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    for url in [
        "https://example.com/a\nb",
        "\u{1}https://example.com",
        "https://example.com/a\tb",
        " https://example.com",
    ] {
        let response = server
            .post("/api/links")
            .json(&json!({ "target_url": url, "code": "ctrl123" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    }

    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_create_link_wrong_type_target_url() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": 123 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "invalid_url");
    assert_eq!(body["error"]["message"], "Invalid URL provided");
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_create_link_wrong_type_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/links")
        .json(&json!({ "target_url": "https://example.com", "code": 123456 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "invalid_code_format"
    );
    assert_eq!(repo.count(), 0);
}

#[tokio::test]
async fn test_create_link_unreadable_body() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    // No JSON content type.
    let response = server
        .post("/api/links")
        .text(r#"{"target_url":"https://example.com"}"#)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    // Malformed JSON.
    let response = server
        .post("/api/links")
        .text(r#"{"target_url":"#)
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    // Valid JSON, wrong shape.
    let response = server
        .post("/api/links")
        .json(&json!(["https://example.com"]))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");

    assert_eq!(repo.count(), 0);
}
