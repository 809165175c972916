use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clarity_engine::{
    DocumentRef, EngineEvent, FailureKind, ProgressSink, ReqwestUploader, Stage, UploadProgress,
    UploadRequest, UploadSettings, Uploader, BACKEND_DEFAULT_ERROR,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::Progress(UploadProgress { stage, .. }) => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn document_on_disk(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn request_for(file: &NamedTempFile, action: &str) -> UploadRequest {
    UploadRequest {
        document: DocumentRef {
            name: "notes.txt".to_string(),
            path: file.path().to_path_buf(),
            mime_type: "text/plain".to_string(),
        },
        action: action.to_string(),
    }
}

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    ReqwestUploader::new(UploadSettings {
        endpoint: format!("{}/upload", server.uri()),
        ..UploadSettings::default()
    })
}

#[tokio::test]
async fn upload_sends_multipart_and_returns_extracted_text() {
    clarity_logging::initialize_for_tests();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"document\""))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("hello from disk"))
        .and(body_string_contains("name=\"action\""))
        .and(body_string_contains("extract-instructions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "filename": "notes.txt",
            "extracted_text": "Hello"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = document_on_disk("hello from disk");
    let sink = TestSink::default();
    let outcome = uploader_for(&server)
        .upload(1, &request_for(&file, "extract-instructions"), &sink)
        .await
        .expect("upload ok");

    assert_eq!(outcome.text, "Hello");
    assert_eq!(outcome.filename.as_deref(), Some("notes.txt"));
    assert_eq!(
        sink.stages(),
        vec![Stage::Reading, Stage::Sending, Stage::Decoding]
    );
}

#[tokio::test]
async fn server_error_reports_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server down"))
        .mount(&server)
        .await;

    let file = document_on_disk("text");
    let err = uploader_for(&server)
        .upload(2, &request_for(&file, "summarize"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert!(err.message.contains("500"));
    assert!(err.message.contains("server down"));
}

#[tokio::test]
async fn backend_rejection_uses_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": false, "error": "bad format" })),
        )
        .mount(&server)
        .await;

    let file = document_on_disk("text");
    let err = uploader_for(&server)
        .upload(3, &request_for(&file, "simplify"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert!(err.kind.is_backend());
    assert_eq!(err.message, "bad format");
}

#[tokio::test]
async fn backend_rejection_without_error_uses_default_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let file = document_on_disk("text");
    let err = uploader_for(&server)
        .upload(4, &request_for(&file, "analyze"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, BACKEND_DEFAULT_ERROR);
}

#[tokio::test]
async fn malformed_json_is_a_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let file = document_on_disk("text");
    let err = uploader_for(&server)
        .upload(5, &request_for(&file, "summarize"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidResponse);
    assert!(!err.kind.is_backend());
}

#[tokio::test]
async fn unreadable_document_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = UploadRequest {
        document: DocumentRef {
            name: "gone.pdf".to_string(),
            path: std::env::temp_dir().join("clarity-missing-document.pdf"),
            mime_type: "application/pdf".to_string(),
        },
        action: "summarize".to_string(),
    };
    let sink = TestSink::default();
    let err = uploader_for(&server)
        .upload(6, &request, &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Read);
    assert!(err.message.contains("clarity-missing-document.pdf"));
    assert_eq!(sink.stages(), vec![Stage::Reading]);
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "success": true, "extracted_text": "late" })),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: format!("{}/upload", server.uri()),
        request_timeout: Some(Duration::from_millis(50)),
        ..UploadSettings::default()
    });
    let file = document_on_disk("text");
    let err = uploader
        .upload(7, &request_for(&file, "summarize"), &TestSink::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}
