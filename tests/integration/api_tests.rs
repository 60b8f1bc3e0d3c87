//! API integration tests against a running server

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";
const PASSWORD: &str = "integration";

/// Register a fresh user and return its login
async fn register_user(client: &Client) -> String {
    let login = format!("it_{}", uuid::Uuid::new_v4().simple());

    let response = client
        .post(format!("{}/register/", BASE_URL))
        .json(&json!({
            "login": login,
            "password": PASSWORD,
            "first_name": "Integration",
            "last_name": "Test"
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), StatusCode::CREATED);
    login
}

async fn create_course(client: &Client, login: &str, title: &str) -> Value {
    let response = client
        .post(format!("{}/courses/", BASE_URL))
        .basic_auth(login, Some(PASSWORD))
        .json(&json!({ "title": title, "description": "Created by integration tests" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let login = register_user(&client).await;

    let response = client
        .get(format!("{}/login/", BASE_URL))
        .basic_auth(&login, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/users/self/", BASE_URL))
        .basic_auth(&login, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], login.as_str());
    assert_eq!(body["name"], "Integration Test");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let login = register_user(&client).await;

    let response = client
        .get(format!("{}/login/", BASE_URL))
        .basic_auth(&login, Some("wrong"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("www-authenticate"));
}

#[tokio::test]
#[ignore]
async fn test_course_crud() {
    let client = Client::new();
    let owner = register_user(&client).await;
    let other = register_user(&client).await;

    let course = create_course(&client, &owner, "Integration course").await;
    let id = course["id"].as_i64().expect("No course id");

    let response = client
        .put(format!("{}/courses/{}", BASE_URL, id))
        .basic_auth(&owner, Some(PASSWORD))
        .json(&json!({ "title": "Renamed course" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Renamed course");

    let response = client
        .get(format!("{}/courses/?type=admin&total=true", BASE_URL))
        .basic_auth(&owner, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["meta"]["total"].as_i64().unwrap_or(0) >= 1);

    let response = client
        .delete(format!("{}/courses/{}", BASE_URL, id))
        .basic_auth(&other, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    for _ in 0..2 {
        let response = client
            .delete(format!("{}/courses/{}", BASE_URL, id))
            .basic_auth(&owner, Some(PASSWORD))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({}));
    }
}

#[tokio::test]
#[ignore]
async fn test_enrollment() {
    let client = Client::new();
    let owner = register_user(&client).await;
    let student = register_user(&client).await;
    let course = create_course(&client, &owner, "Enrollment course").await;
    let id = course["id"].as_i64().expect("No course id");

    let response = client
        .post(format!("{}/courses/{}/enter/", BASE_URL, id))
        .basic_auth(&student, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["entered"], true);
    assert_eq!(body["students_count"], 1);

    let response = client
        .post(format!("{}/courses/{}/leave/", BASE_URL, id))
        .basic_auth(&student, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["entered"], false);
    assert_eq!(body["students_count"], 0);
}

#[tokio::test]
#[ignore]
async fn test_lessons() {
    let client = Client::new();
    let owner = register_user(&client).await;
    let course = create_course(&client, &owner, "Lesson course").await;
    let course_id = course["id"].as_i64().expect("No course id");

    for title in ["First", "Second"] {
        let response = client
            .post(format!("{}/lessons/", BASE_URL))
            .basic_auth(&owner, Some(PASSWORD))
            .json(&json!({ "title": title, "theme": "basics", "course_id": course_id }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = client
        .get(format!("{}/lessons/?courseId={}", BASE_URL, course_id))
        .basic_auth(&owner, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let lessons = body["lessons"].as_array().expect("No lessons array");
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0]["number"], 1);
    assert_eq!(lessons[1]["number"], 2);

    let response = client
        .get(format!("{}/lessons/", BASE_URL))
        .basic_auth(&owner, Some(PASSWORD))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_image_upload() {
    let client = Client::new();

    let response = client
        .post(format!("{}/fs/images/", BASE_URL))
        .header("content-type", "image/gif")
        .body(b"GIF89a".to_vec())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let url = response.text().await.expect("Failed to read response");
    assert!(url.ends_with(".gif"));

    let response = client.get(&url).send().await.expect("Failed to fetch image");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.bytes().await.expect("Failed to read image");
    assert_eq!(&bytes[..], b"GIF89a");
}
