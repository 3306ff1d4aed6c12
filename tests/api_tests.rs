//! End-to-end tests over the HTTP surface
//!
//! Each test boots the full router against a fresh in-memory store and
//! drives it the way a client would.

use axum::http::StatusCode;
use axum_test::TestServer;
use portal::config::AppConfig;
use portal::server::builder::AppBuilder;
use serde_json::{Value, json};

fn server() -> TestServer {
    server_with(AppConfig::default())
}

fn server_with(config: AppConfig) -> TestServer {
    TestServer::try_new(AppBuilder::new(config).build()).expect("router should build")
}

async fn create(server: &TestServer, path: &str, body: Value) -> Value {
    let response = server.post(path).json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let server = server();
    server.get("/health").await.assert_status_ok();
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn created_entity_round_trips() {
    let server = server();
    let created = create(
        &server,
        "/students",
        json!({ "name": "John Doe", "age": 20, "grade": "B" }),
    )
    .await;

    let id = created["id"].as_str().expect("rendered id");
    let response = server.get(&format!("/students/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn designation_filter_is_case_insensitive() {
    let server = server();
    create(
        &server,
        "/employees",
        json!({ "emp_id": "EMP003", "emp_name": "John Doe", "designation": "Manager" }),
    )
    .await;
    create(
        &server,
        "/employees",
        json!({ "emp_id": "EMP004", "emp_name": "Jane Roe", "designation": "Engineer" }),
    )
    .await;

    let response = server
        .get("/employees")
        .add_query_param("designation", "manager")
        .await;
    response.assert_status_ok();

    let page = response.json::<Value>();
    let data = page["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["emp_name"], "John Doe");
    assert_eq!(page["pagination"]["total"], 1);
}

#[tokio::test]
async fn badge_range_filter_returns_the_inclusive_window() {
    let server = server();
    for n in 2..=7 {
        let badge = format!("EMP{:03}", n);
        create(
            &server,
            "/employees",
            json!({ "emp_id": badge, "emp_name": format!("Employee {}", n), "designation": "Engineer" }),
        )
        .await;
    }

    let response = server
        .get("/employees")
        .add_query_param("id_min", "EMP003")
        .add_query_param("id_max", "EMP005")
        .await;
    response.assert_status_ok();

    let page = response.json::<Value>();
    let badges: Vec<&str> = page["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|e| e["emp_id"].as_str().expect("badge"))
        .collect();
    assert_eq!(badges, vec!["EMP003", "EMP004", "EMP005"]);
}

#[tokio::test]
async fn unknown_filter_names_are_ignored() {
    let server = server();
    create(&server, "/students", json!({ "name": "X", "age": 20 })).await;

    let response = server
        .get("/students")
        .add_query_param("shoe_size", "44")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["pagination"]["total"], 1);
}

#[tokio::test]
async fn requested_page_size_is_clamped_to_the_configured_maximum() {
    let mut config = AppConfig::default();
    config.pagination.max_limit = 50;
    let server = server_with(config);

    for n in 0..55 {
        create(
            &server,
            "/students",
            json!({ "name": format!("Student {}", n), "age": 20 }),
        )
        .await;
    }

    let response = server.get("/students").add_query_param("limit", "1000").await;
    response.assert_status_ok();

    let page = response.json::<Value>();
    assert_eq!(page["pagination"]["limit"], 50);
    assert_eq!(page["data"].as_array().expect("data array").len(), 50);
    assert_eq!(page["pagination"]["total"], 55);
    assert_eq!(page["pagination"]["has_next"], true);
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_accurate_total() {
    let server = server();
    for n in 0..3 {
        create(
            &server,
            "/students",
            json!({ "name": format!("Student {}", n), "age": 20 }),
        )
        .await;
    }

    let response = server.get("/students").add_query_param("page", "9").await;
    response.assert_status_ok();

    let page = response.json::<Value>();
    assert!(page["data"].as_array().expect("data array").is_empty());
    assert_eq!(page["pagination"]["total"], 3);
    assert_eq!(page["pagination"]["has_next"], false);
}

#[tokio::test]
async fn create_with_missing_fields_is_rejected_with_field_errors() {
    let server = server();
    let response = server.post("/students").json(&json!({ "name": "X" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let fields = body["details"]["fields"].as_array().expect("field errors");
    assert!(fields.iter().any(|e| e["field"] == "age"));

    // nothing was stored
    let page = server.get("/students").await.json::<Value>();
    assert_eq!(page["pagination"]["total"], 0);
}

#[tokio::test]
async fn unknown_body_fields_are_rejected() {
    let server = server();
    let response = server
        .post("/students")
        .json(&json!({ "name": "X", "age": 20, "dorm": "A4" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    let fields = body["details"]["fields"].as_array().expect("field errors");
    assert!(fields.iter().any(|e| e["field"] == "dorm"));
}

#[tokio::test]
async fn partial_update_preserves_unsupplied_fields() {
    let server = server();
    let created = create(&server, "/students", json!({ "name": "X", "age": 20 })).await;
    let id = created["id"].as_str().expect("rendered id");

    let response = server
        .put(&format!("/students/{}", id))
        .json(&json!({ "age": 21 }))
        .await;
    response.assert_status_ok();

    let updated = response.json::<Value>();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "X");
    assert_eq!(updated["age"], 21);
    assert_eq!(updated["created_at"], created["created_at"]);
}

#[tokio::test]
async fn identifier_in_the_update_body_is_ignored() {
    let server = server();
    let created = create(&server, "/students", json!({ "name": "X", "age": 20 })).await;
    let id = created["id"].as_str().expect("rendered id");

    let response = server
        .put(&format!("/students/{}", id))
        .json(&json!({ "id": "not-even-a-uuid", "age": 21 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["id"], created["id"]);
}

#[tokio::test]
async fn unknown_identifiers_are_not_found() {
    let server = server();
    let path = format!("/students/{}", uuid::Uuid::new_v4());

    let response = server.get(&path).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["code"], "NOT_FOUND");

    server
        .put(&path)
        .json(&json!({ "age": 21 }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_no_content_then_not_found() {
    let server = server();
    let created = create(&server, "/students", json!({ "name": "X", "age": 20 })).await;
    let path = format!("/students/{}", created["id"].as_str().expect("id"));

    server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_render_embeds_its_comments() {
    let server = server();
    let blog = create(&server, "/blogs", json!({ "blog_title": "A", "blog_body": "body" })).await;
    let blog_id = blog["id"].as_str().expect("blog id");
    assert_eq!(blog["comments"].as_array().expect("embed").len(), 0);

    let comment = create(
        &server,
        "/comments",
        json!({ "blog": blog_id, "comment": "hi" }),
    )
    .await;

    let response = server.get(&format!("/blogs/{}", blog_id)).await;
    response.assert_status_ok();

    let rendered = response.json::<Value>();
    let embedded = rendered["comments"].as_array().expect("embed");
    assert_eq!(embedded.len(), 1);
    assert_eq!(embedded[0]["id"], comment["id"]);
    assert_eq!(embedded[0]["comment"], "hi");
}

#[tokio::test]
async fn comment_with_dangling_blog_reference_is_rejected() {
    let server = server();
    let response = server
        .post("/comments")
        .json(&json!({ "blog": uuid::Uuid::new_v4().to_string(), "comment": "hi" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let fields = body["details"]["fields"].as_array().expect("field errors");
    assert_eq!(fields[0]["field"], "blog");

    // never stored
    let page = server.get("/comments").await.json::<Value>();
    assert_eq!(page["pagination"]["total"], 0);
}

#[tokio::test]
async fn deleting_a_blog_cascades_to_its_comments() {
    let server = server();
    let blog = create(&server, "/blogs", json!({ "blog_title": "A", "blog_body": "body" })).await;
    let blog_id = blog["id"].as_str().expect("blog id");

    let comment = create(
        &server,
        "/comments",
        json!({ "blog": blog_id, "comment": "hi" }),
    )
    .await;
    let other_blog = create(
        &server,
        "/blogs",
        json!({ "blog_title": "B", "blog_body": "body" }),
    )
    .await;
    let survivor = create(
        &server,
        "/comments",
        json!({ "blog": other_blog["id"].as_str().expect("id"), "comment": "stays" }),
    )
    .await;

    server
        .delete(&format!("/blogs/{}", blog_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/comments/{}", comment["id"].as_str().expect("id")))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // the other blog's comment is untouched
    server
        .get(&format!("/comments/{}", survivor["id"].as_str().expect("id")))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn comments_can_be_listed_by_blog() {
    let server = server();
    let blog_a = create(&server, "/blogs", json!({ "blog_title": "A", "blog_body": "a" })).await;
    let blog_b = create(&server, "/blogs", json!({ "blog_title": "B", "blog_body": "b" })).await;
    let a_id = blog_a["id"].as_str().expect("id");
    let b_id = blog_b["id"].as_str().expect("id");

    create(&server, "/comments", json!({ "blog": a_id, "comment": "one" })).await;
    create(&server, "/comments", json!({ "blog": b_id, "comment": "two" })).await;

    let response = server.get("/comments").add_query_param("blog", a_id).await;
    response.assert_status_ok();

    let page = response.json::<Value>();
    let data = page["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["comment"], "one");
}
