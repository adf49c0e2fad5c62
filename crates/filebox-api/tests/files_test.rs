//! Upload, search and download integration tests.
//!
//! Run with: `cargo test -p filebox-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::storage::FailingStorage;
use helpers::{
    fetch_signed_url, query_param, setup_test_app, setup_test_app_with_storage, upload,
    upload_form, TEST_MAX_UPLOAD_BYTES,
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[tokio::test]
async fn test_upload_search_download_round_trip() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/upload")
        .multipart(upload_form("APP-42", "spec.pdf", b"%PDF-1.4 spec body"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File uploaded successfully");
    let file_id = body["file_id"].as_i64().expect("file_id");

    let response = client.get("/search").add_query_param("q", "APP-42").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let results = body["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], file_id);
    assert_eq!(results[0]["product_id"], "APP-42");
    assert_eq!(results[0]["filename"], "spec.pdf");
    assert!(results[0]["upload_date"].is_string());
    assert!(results[0].get("storage_path").is_none());

    let response = client.get(&format!("/download/{}", file_id)).await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let url = body["downloadUrl"].as_str().expect("downloadUrl");

    let response = fetch_signed_url(client, url).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.4 spec body");
}

#[tokio::test]
async fn test_signed_url_valid_for_one_hour() {
    let app = setup_test_app().await;
    let client = app.client();
    let file_id = upload(client, "APP-1", "a.txt", b"hello").await;

    let before = unix_now();
    let response = client.get(&format!("/download/{}", file_id)).await;
    let after = unix_now();

    let body: serde_json::Value = response.json();
    let url = body["downloadUrl"].as_str().expect("downloadUrl");
    let expires: u64 = query_param(url, "expires")
        .expect("expires")
        .parse()
        .expect("numeric expires");
    assert!(expires >= before + 3600 && expires <= after + 3600);
}

#[tokio::test]
async fn test_search_returns_only_exact_matches_in_upload_order() {
    let app = setup_test_app().await;
    let client = app.client();

    let first = upload(client, "APP-1", "one.txt", b"1").await;
    upload(client, "APP-2", "two.txt", b"2").await;
    let third = upload(client, "APP-1", "three.txt", b"3").await;
    upload(client, "app-1", "lower.txt", b"4").await;

    let response = client.get("/search").add_query_param("q", "APP-1").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let ids: Vec<i64> = body["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|r| r["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, vec![first, third]);
}

#[tokio::test]
async fn test_search_unknown_code_returns_empty_results() {
    let app = setup_test_app().await;
    let client = app.client();
    upload(client, "APP-1", "a.txt", b"x").await;

    let response = client.get("/search").add_query_param("q", "NONE").await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["results"], serde_json::json!([]));
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/search").await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "Query required");

    let response = client.get("/search").add_query_param("q", "").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_without_file_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_text("product_id", "APP-1");
    let response = client.post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File and Application Code required");
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_upload_without_product_id_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let part = Part::bytes(bytes::Bytes::from_static(b"data"))
        .file_name("a.txt")
        .mime_type("text/plain");
    let response = client
        .post("/upload")
        .multipart(MultipartForm::new().add_part("file", part))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .post("/upload")
        .multipart(upload_form("", "a.txt", b"data"))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File and Application Code required");
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_text_field_named_file_is_not_an_upload() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new()
        .add_text("file", "just some text")
        .add_text("product_id", "APP-1");
    let response = client.post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File and Application Code required");
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_upload_empty_file_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/upload")
        .multipart(upload_form("APP-1", "empty.txt", b""))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_upload_non_multipart_body_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/upload")
        .json(&serde_json::json!({ "product_id": "APP-1" }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File and Application Code required");
}

#[tokio::test]
async fn test_upload_with_two_file_parts_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = upload_form("APP-1", "a.txt", b"a").add_part(
        "file",
        Part::bytes(bytes::Bytes::from_static(b"b")).file_name("b.txt"),
    );
    let response = client.post("/upload").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_same_filename_twice_gets_distinct_records() {
    let app = setup_test_app().await;
    let client = app.client();

    let first = upload(client, "APP-1", "same.txt", b"first").await;
    let second = upload(client, "APP-1", "same.txt", b"second").await;
    assert_ne!(first, second);

    for (id, expected) in [(first, &b"first"[..]), (second, &b"second"[..])] {
        let body: serde_json::Value = client.get(&format!("/download/{}", id)).await.json();
        let response = fetch_signed_url(client, body["downloadUrl"].as_str().unwrap()).await;
        assert_eq!(response.as_bytes().as_ref(), expected);
    }
}

async fn download_bytes(client: &axum_test::TestServer, file_id: i64) -> Vec<u8> {
    let body: serde_json::Value = client.get(&format!("/download/{}", file_id)).await.json();
    let url = body["downloadUrl"].as_str().expect("downloadUrl");
    let response = fetch_signed_url(client, url).await;
    assert_eq!(response.status_code(), 200);
    response.as_bytes().to_vec()
}

#[tokio::test]
async fn test_filenames_with_dots_round_trip() {
    let app = setup_test_app().await;
    let client = app.client();

    let names = [
        "a..b.txt",
        "report..final.pdf",
        "archive...tar",
        "..hidden",
        "my report (v2).pdf",
    ];

    for (i, name) in names.iter().enumerate() {
        let content = format!("content of file {}", i);
        let file_id = upload(client, "APP-NAMES", name, content.as_bytes()).await;
        assert_eq!(download_bytes(client, file_id).await, content.as_bytes(), "{}", name);
    }

    let body: serde_json::Value = client
        .get("/search")
        .add_query_param("q", "APP-NAMES")
        .await
        .json();
    let filenames: Vec<&str> = body["results"]
        .as_array()
        .expect("results")
        .iter()
        .map(|r| r["filename"].as_str().expect("filename"))
        .collect();
    assert_eq!(filenames, names.to_vec());
}

#[tokio::test]
async fn test_unicode_and_path_like_filenames_round_trip() {
    let app = setup_test_app().await;
    let client = app.client();

    for (i, name) in ["résumé 2024.pdf", "../../etc/passwd", "C:\\temp\\x.txt"]
        .iter()
        .enumerate()
    {
        let content = format!("payload {}", i);
        let file_id = upload(client, "APP-1", name, content.as_bytes()).await;
        assert_eq!(download_bytes(client, file_id).await, content.as_bytes(), "{}", name);
    }
    assert_eq!(app.file_count().await, 3);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let just_over = vec![b'x'; TEST_MAX_UPLOAD_BYTES + 1];
    let response = client
        .post("/upload")
        .multipart(upload_form("APP-1", "big.bin", &just_over))
        .await;
    assert_eq!(response.status_code(), 413);

    let far_over = vec![b'x'; TEST_MAX_UPLOAD_BYTES * 16];
    let response = client
        .post("/upload")
        .multipart(upload_form("APP-1", "huge.bin", &far_over))
        .await;
    assert_eq!(response.status_code(), 413);

    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_download_unknown_id_is_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get("/download/99999").await;
    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "File not found");
}

#[tokio::test]
async fn test_download_non_numeric_id_is_bad_request() {
    let app = setup_test_app().await;
    let response = app.client().get("/download/abc").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_storage_failure_leaves_no_record() {
    let app = setup_test_app_with_storage(Arc::new(FailingStorage)).await;
    let client = app.client();

    let response = client
        .post("/upload")
        .multipart(upload_form("APP-1", "a.txt", b"data"))
        .await;
    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "Storage upload failed");
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert!(body.get("details").is_none());
    assert_eq!(app.file_count().await, 0);
}

#[tokio::test]
async fn test_signing_failure_reports_external_service_error() {
    let app = setup_test_app_with_storage(Arc::new(FailingStorage)).await;
    let record = app
        .state
        .db
        .file_repository
        .create(filebox_core::models::NewFileRecord::new(
            "APP-1",
            "a.txt",
            "uploads/abc/a.txt",
        ))
        .await
        .expect("insert");

    let response = app
        .client()
        .get(&format!("/download/{}", record.id))
        .await;
    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "Error creating signed URL");
}

#[tokio::test]
async fn test_metadata_failure_after_upload_reports_db_error() {
    let app = setup_test_app().await;
    app.state.db.pool.close().await;

    let response = app
        .client()
        .post("/upload")
        .multipart(upload_form("APP-1", "orphan.txt", b"data"))
        .await;
    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["msg"], "DB error");

    // The blob was written before the insert failed and stays behind.
    let uploads = app._temp_dir.path().join("uploads");
    let orphaned = std::fs::read_dir(&uploads)
        .expect("uploads directory")
        .count();
    assert_eq!(orphaned, 1);
}
