//! HTTP surface tests: routing, JSON shapes, error bodies and export headers.

mod common;

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use deckhand::config::AppConfig;
use deckhand::export::PPTX_CONTENT_TYPE;
use deckhand::handlers;
use deckhand::storage::{BlobStore, LocalBlobStore, MemoryBlobStore};
use common::{PNG_BYTES, data_url, setup_test_db};

macro_rules! init_app {
    ($db:expr, $blobs:expr) => {{
        let blobs: Arc<dyn BlobStore> = $blobs;
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.pool().clone()))
                .app_data(web::Data::from(blobs))
                .configure(|cfg| handlers::configure(cfg, &AppConfig::default())),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_create_and_list_presentations() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/presentations")
        .set_json(json!({"title": "Roadmap", "description": "2025 plans"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["title"], "Roadmap");
    assert_eq!(created["slides"], json!([]));
    assert!(created["createdAt"].is_string());

    let req = test::TestRequest::get().uri("/presentations").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[actix_rt::test]
async fn test_create_slide_returns_camel_case_json() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/presentations")
        .set_json(json!({"title": "Deck"}))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({
            "title": "Hello",
            "contentType": "TEXT",
            "content": "World",
            "presentationId": deck["id"],
        }))
        .to_request();
    let slide: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(slide["contentType"], "TEXT");
    assert_eq!(slide["presentationId"], deck["id"]);
    assert_eq!(slide["fileUrl"], Value::Null);

    let uri = format!("/slides?presentationId={}", deck["id"].as_str().unwrap());
    let req = test::TestRequest::get().uri(&uri).to_request();
    let slides: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(slides.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get().uri("/slides").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn test_invalid_content_type_is_400_with_error_body() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({"title": "Bad", "contentType": "AUDIO"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "error", "message": "Invalid content type"}));
}

#[actix_rt::test]
async fn test_malformed_json_is_400_with_error_body() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/slides")
        .insert_header(header::ContentType::json())
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn test_upload_failure_is_500() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::failing()));

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({
            "title": "Image",
            "contentType": "IMAGE",
            "fileUrl": data_url("image/png", PNG_BYTES),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "error", "message": "Failed to upload file"}));

    let req = test::TestRequest::get().uri("/slides").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all, json!([]));
}

#[actix_rt::test]
async fn test_export_carries_fixed_headers() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/presentations")
        .set_json(json!({"title": "Export me"}))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;
    let deck_id = deck["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({"title": "Only", "contentType": "TEXT", "content": "Slide", "presentationId": deck_id}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/ppt?presentationId={deck_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), PPTX_CONTENT_TYPE);
    assert_eq!(
        resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"presentation.pptx\""
    );

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"PK"));
}

#[actix_rt::test]
async fn test_admin_pages_render() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    for uri in ["/admin", "/admin/presentations", "/admin/slides", "/admin?presentationId=missing"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    }
}

#[actix_rt::test]
async fn test_viewer_shows_slides_and_download_name() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::post()
        .uri("/presentations")
        .set_json(json!({"title": "Team sync"}))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;
    let deck_id = deck["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({
            "title": "Agenda",
            "contentType": "BULLETS",
            "content": "Status\nRisks",
            "presentationId": deck_id,
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/admin?presentationId={deck_id}"))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<li>Risks</li>"));
    assert!(html.contains("download=\"Team_sync.pptx\""));
}

#[actix_rt::test]
async fn test_root_redirects_and_unknown_is_404() {
    let db = setup_test_db().await;
    let app = init_app!(db, Arc::new(MemoryBlobStore::new()));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_uploaded_media_is_served_from_blob_path() {
    let db = setup_test_db().await;
    let dir = TempDir::new().unwrap();
    let blob_dir = dir.path().to_string_lossy().into_owned();
    let config = AppConfig::from_lookup(|key| (key == "BLOB_DIR").then(|| blob_dir.clone()));
    let blobs: Arc<dyn BlobStore> =
        Arc::new(LocalBlobStore::new(config.blob_dir.clone(), &config.blob_public_path));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(db.pool().clone()))
            .app_data(web::Data::from(blobs))
            .configure(|cfg| handlers::configure(cfg, &config)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/presentations")
        .set_json(json!({"title": "Media"}))
        .to_request();
    let deck: Value = test::call_and_read_body_json(&app, req).await;
    let deck_id = deck["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/slides")
        .set_json(json!({
            "title": "Chart",
            "contentType": "IMAGE",
            "fileUrl": data_url("image/png", PNG_BYTES),
            "presentationId": deck_id,
        }))
        .to_request();
    let slide: Value = test::call_and_read_body_json(&app, req).await;
    let path = slide["fileUrl"].as_str().unwrap().to_string();
    assert!(dir.path().join(&path).is_file());

    let req = test::TestRequest::get().uri(&format!("/blobs/{path}")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), PNG_BYTES);

    // The viewer points at the same file
    let req = test::TestRequest::get()
        .uri(&format!("/admin?presentationId={deck_id}"))
        .to_request();
    let html = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    let file_name = path.rsplit('/').next().unwrap();
    assert!(html.contains(file_name));
}
