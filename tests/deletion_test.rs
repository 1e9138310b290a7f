use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_file_drop::config::StorageConfig;
use rust_file_drop::infrastructure::storage;
use rust_file_drop::{AppState, create_app};
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_app(root: &Path) -> Router {
    let config = StorageConfig::for_root(root);
    let storage_service = storage::setup_storage(&config).await.unwrap();
    create_app(AppState::new(storage_service, None, config))
}

async fn send(app: &Router, method: &str, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn text(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_delete_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;
    let token = Uuid::new_v4();
    let stored = dir.path().join("uploads").join(format!("{}.txt", token));
    std::fs::write(&stored, b"bye").unwrap();

    let response = send(&app, "DELETE", &format!("/delete/{}", token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "File deleted successfully");
    assert!(!stored.exists());

    // already gone
    let response = send(&app, "DELETE", &format!("/delete/{}", token)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_delete_rejects_non_token() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;
    std::fs::write(dir.path().join("uploads/keep"), b"keep").unwrap();

    let response = send(&app, "DELETE", "/delete/keep").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(dir.path().join("uploads/keep").exists());
}

#[tokio::test]
async fn test_delete_all_continues_past_failures() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;
    let uploads = dir.path().join("uploads");
    for name in ["a.txt", "b.txt", "c.pdf"] {
        std::fs::write(uploads.join(name), name).unwrap();
    }
    // removing a directory with remove_file fails
    std::fs::create_dir(uploads.join("nested")).unwrap();

    let response = send(&app, "DELETE", "/deleteall").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-deleted-count"], "3");
    assert_eq!(response.headers()["x-delete-failures"], "1");
    assert_eq!(text(response).await, "All files deleted successfully");

    let response = send(&app, "GET", "/list").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["fileUrls"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_all_in_user_folder() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;
    std::fs::create_dir_all(dir.path().join("alice")).unwrap();
    std::fs::write(dir.path().join("alice/one.txt"), b"1").unwrap();
    std::fs::write(dir.path().join("uploads/other.txt"), b"2").unwrap();

    let response = send(&app, "DELETE", "/deleteall?userFolder=alice").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-deleted-count"], "1");

    assert!(!dir.path().join("alice/one.txt").exists());
    assert!(dir.path().join("uploads/other.txt").exists());
}

#[tokio::test]
async fn test_delete_all_missing_folder_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;

    let response = send(&app, "DELETE", "/deleteall?userFolder=nobody").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_delete_all_with_malformed_body_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path()).await;
    let keep = dir.path().join("uploads").join("keep.txt");
    std::fs::write(&keep, b"keep").unwrap();
    std::fs::create_dir_all(dir.path().join("alice")).unwrap();
    let other = dir.path().join("alice").join("one.txt");
    std::fs::write(&other, b"one").unwrap();

    for body in [r#"{"userFolder": "alice",}"#, r#"{"userFolder": 42}"#] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/deleteall")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    assert!(keep.exists());
    assert!(other.exists());

    // a well-formed body targets only that folder
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/deleteall")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"userFolder": "alice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(keep.exists());
    assert!(!other.exists());
}
