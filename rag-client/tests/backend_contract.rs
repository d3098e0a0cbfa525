//! Contract tests for [`RagClient`] against a stub backend.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use rag_client::{ClientConfig, ClientError, RagClient};

#[derive(Default)]
struct Stub {
    list_response: Mutex<Value>,
    ask_response: Mutex<Value>,
    progress_response: Mutex<Value>,
    deleted: Mutex<Vec<String>>,
}

async fn list_files(State(stub): State<Arc<Stub>>) -> Json<Value> {
    Json(stub.list_response.lock().unwrap().clone())
}

async fn ask_question(State(stub): State<Arc<Stub>>, Json(_): Json<Value>) -> Json<Value> {
    Json(stub.ask_response.lock().unwrap().clone())
}

async fn progress(State(stub): State<Arc<Stub>>, Path(_): Path<String>) -> Json<Value> {
    Json(stub.progress_response.lock().unwrap().clone())
}

async fn delete_file(State(stub): State<Arc<Stub>>, Path(filename): Path<String>) -> Json<Value> {
    stub.deleted.lock().unwrap().push(filename);
    Json(json!({"status": "success"}))
}

async fn boom() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "backend fell over")
}

async fn spawn_stub(stub: Arc<Stub>) -> String {
    let app = Router::new()
        .route("/get-pdf-files", get(list_files))
        .route("/ask-question", post(ask_question))
        .route("/vectorize-progress/{filename}", get(progress))
        .route("/delete-file/{filename}", delete(delete_file))
        .route("/vectorize-pdf", post(boom))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base: &str) -> RagClient {
    RagClient::new(ClientConfig {
        base_url: base.to_string(),
        timeout_secs: None,
    })
    .unwrap()
}

#[tokio::test]
async fn list_files_parses_the_envelope() {
    let stub = Arc::new(Stub::default());
    *stub.list_response.lock().unwrap() = json!({
        "status": "success",
        "files": [
            {"filename": "a.pdf", "size": 10, "mtime": 1.0, "vectorized": true},
            {"filename": "b.pdf", "size": 20, "mtime": 2.0, "vectorized": false},
        ]
    });
    let base = spawn_stub(stub).await;

    let files = client(&base).list_files().await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].filename, "a.pdf");
    assert!(files[0].vectorized);
    assert!(!files[1].vectorized);
}

#[tokio::test]
async fn backend_error_carries_its_message() {
    let stub = Arc::new(Stub::default());
    *stub.list_response.lock().unwrap() = json!({"status": "error", "message": "disk on fire"});
    let base = spawn_stub(stub).await;

    let err = client(&base).list_files().await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(ref m) if m == "disk on fire"));
}

#[tokio::test]
async fn backend_error_without_message_gets_a_fallback() {
    let stub = Arc::new(Stub::default());
    *stub.list_response.lock().unwrap() = json!({"status": "error"});
    let base = spawn_stub(stub).await;

    let err = client(&base).list_files().await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(ref m) if m == "failed to fetch the PDF file list"));
}

#[tokio::test]
async fn non_2xx_maps_to_http_status() {
    let stub = Arc::new(Stub::default());
    let base = spawn_stub(stub).await;

    let err = client(&base).vectorize_pdf("a.pdf").await.unwrap_err();
    match err {
        ClientError::HttpStatus {
            status, snippet, ..
        } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(snippet.contains("backend fell over"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn ask_requires_an_answer_payload() {
    let stub = Arc::new(Stub::default());
    *stub.ask_response.lock().unwrap() = json!({"status": "success"});
    let base = spawn_stub(stub.clone()).await;

    let err = client(&base).ask("what is x?", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));

    *stub.ask_response.lock().unwrap() = json!({"status": "error", "message": "timeout"});
    let err = client(&base).ask("what is x?", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Backend(ref m) if m == "timeout"));
}

#[tokio::test]
async fn ask_returns_the_structured_answer() {
    let stub = Arc::new(Stub::default());
    *stub.ask_response.lock().unwrap() = json!({
        "answer": {
            "stepByStepReasoning": "1. check page 5",
            "reasoningSummary": "page 5 has the table",
            "relatedPages": [5],
            "finalAnswer": "the total is 12",
        }
    });
    let base = spawn_stub(stub).await;

    let answer = client(&base)
        .ask("what is the total?", Some("a.pdf"))
        .await
        .unwrap();
    assert_eq!(answer.final_answer, "the total is 12");
    assert_eq!(answer.related_pages, vec![5]);
    assert!(answer.timing.is_none());
}

#[tokio::test]
async fn progress_error_envelope_degrades_to_zero() {
    let stub = Arc::new(Stub::default());
    *stub.progress_response.lock().unwrap() = json!({"status": "error"});
    let base = spawn_stub(stub.clone()).await;

    let progress = client(&base).vectorize_progress("a.pdf").await.unwrap();
    assert_eq!(progress, 0);

    *stub.progress_response.lock().unwrap() = json!({"status": "success", "progress": 63});
    let progress = client(&base).vectorize_progress("a.pdf").await.unwrap();
    assert_eq!(progress, 63);
}

#[tokio::test]
async fn delete_percent_encodes_the_filename() {
    let stub = Arc::new(Stub::default());
    let base = spawn_stub(stub.clone()).await;

    client(&base).delete_file("my report.pdf").await.unwrap();

    // axum decodes the path segment, so the stub sees the raw name.
    assert_eq!(
        stub.deleted.lock().unwrap().as_slice(),
        ["my report.pdf".to_string()]
    );
}
