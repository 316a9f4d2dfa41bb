use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use filetime::{set_file_mtime, FileTime};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use twilight_helper::adapters::{DirectoryLogResolver, JsonConfigStore};
use twilight_helper::app::StatusService;
use twilight_helper::domain::{DomainError, RawGame};
use twilight_helper::http::{router, AppState};
use twilight_helper::ports::GameLogParser;

/// Parser stand-in returning canned JSON, decoded the same way real output is.
enum FakeParser {
    Game(Value),
    Absent,
    Fails(&'static str),
}

impl GameLogParser for FakeParser {
    fn parse_game_log(&self, _path: &Path) -> Result<Option<RawGame>, DomainError> {
        match self {
            FakeParser::Game(value) => Ok(Some(RawGame::decode(value))),
            FakeParser::Absent => Ok(None),
            FakeParser::Fails(msg) => Err(DomainError::Parser(msg.to_string())),
        }
    }
}

struct TestApp {
    _config_dir: TempDir,
    logs: TempDir,
    app: Router,
}

impl TestApp {
    fn new(parser: FakeParser) -> Self {
        let config_dir = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();
        let store = JsonConfigStore::with_paths(
            config_dir.path().join("config.json"),
            logs.path().to_path_buf(),
        )
        .unwrap();
        let service = StatusService::new(
            Arc::new(store),
            Arc::new(DirectoryLogResolver::new()),
            Arc::new(parser),
        );
        let app = router(
            AppState::new(service),
            &["http://localhost:3000".to_string()],
        );

        Self {
            _config_dir: config_dir,
            logs,
            app,
        }
    }

    fn add_log(&self, name: &str, mtime: i64) {
        let path = self.logs.path().join(name);
        fs::write(&path, "Turn 1").unwrap();
        set_file_mtime(&path, FileTime::from_unix_time(mtime, 0)).unwrap();
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    async fn put_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

fn cuba_game() -> Value {
    json!({
        "current_play": {"turn": 3, "possible_draw_cards": ["Cuba"]},
        "cards": {"Cuba": {"side": "USSR", "ops": 2}}
    })
}

#[tokio::test]
async fn test_current_status_ok() {
    let app = TestApp::new(FakeParser::Game(cuba_game()));
    app.add_log("game1.txt", 100);

    let (status, body) = app.get("/api/current-status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "ok",
            "filename": "game1.txt",
            "turn": 3,
            "deck": [{"name": "Cuba", "side": "USSR", "ops": 2}],
            "discarded": [],
            "removed": [],
            "cards_in_hands": [],
            "your_hand": [],
            "opponent_hand": [],
            "error": null
        })
    );
}

#[tokio::test]
async fn test_current_status_uses_latest_log() {
    let app = TestApp::new(FakeParser::Absent);
    app.add_log("a.txt", 100);
    app.add_log("b.txt", 200);

    let (status, body) = app.get("/api/current-status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "no_game_data");
    assert_eq!(body["filename"], "b.txt");
    assert_eq!(body["turn"], Value::Null);
}

#[tokio::test]
async fn test_current_status_no_log_files() {
    let app = TestApp::new(FakeParser::Absent);

    let (status, body) = app.get("/api/current-status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "No log files found in Twilight Struggle directory");
    assert_eq!(body["deck"], json!([]));
}

#[tokio::test]
async fn test_current_status_configured_file_not_found() {
    let app = TestApp::new(FakeParser::Game(cuba_game()));
    app.add_log("game1.txt", 100);

    let (status, _) = app
        .put_json("/api/config/", r#"{"log_file_path": "/abs/missing.txt"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/current-status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["filename"], "missing.txt");
    assert_eq!(body["error"], "Configured log file not found: missing.txt");
}

#[tokio::test]
async fn test_current_status_parser_exception() {
    let app = TestApp::new(FakeParser::Fails("Test error"));
    app.add_log("game1.txt", 100);

    let (status, body) = app.get("/api/current-status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Test error");
    assert_eq!(body["filename"], Value::Null);
    assert_eq!(body["cards_in_hands"], json!([]));
}

#[tokio::test]
async fn test_get_config_defaults() {
    let app = TestApp::new(FakeParser::Absent);

    let (status, body) = app.get("/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["config"]["log_file_path"], Value::Null);
    assert_eq!(
        body["config"]["log_directory"],
        app.logs.path().to_string_lossy().to_string()
    );
}

#[tokio::test]
async fn test_update_config_workflow() {
    let app = TestApp::new(FakeParser::Absent);

    let (status, body) = app
        .put_json("/api/config/", r#"{"log_file_path": "game.txt", "unknown": 1}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["log_file_path"], "game.txt");

    let (_, body) = app.put_json("/api/config/", r#"{"log_directory": "/x"}"#).await;
    assert_eq!(body["config"]["log_file_path"], "game.txt");
    assert_eq!(body["config"]["log_directory"], "/x");

    let (_, before) = app.get("/api/config/").await;
    let (status, _) = app.put_json("/api/config/", "{}").await;
    assert_eq!(status, StatusCode::OK);
    let (_, after) = app.get("/api/config/").await;
    assert_eq!(before, after);

    let (status, body) = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/config/reset")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["log_file_path"], Value::Null);
    assert_eq!(
        body["config"]["log_directory"],
        app.logs.path().to_string_lossy().to_string()
    );
}

#[tokio::test]
async fn test_update_config_rejects_bad_requests() {
    let app = TestApp::new(FakeParser::Absent);

    let (status, body) = app.put_json("/api/config/", r#"{"invalid": json}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "error": "Malformed JSON"}));

    let (status, body) = app.put_json("/api/config/", "null").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");

    let (status, _) = app.put_json("/api/config/", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::put("/api/config/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Content-Type must be application/json");
}

#[tokio::test]
async fn test_unicode_config_values() {
    let app = TestApp::new(FakeParser::Absent);

    let (status, body) = app
        .put_json(
            "/api/config/",
            r#"{"log_file_path": "/path/with/unicode/测试.txt", "log_directory": "/directory/测试"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["log_file_path"], "/path/with/unicode/测试.txt");
}

#[tokio::test]
async fn test_diagnostics_endpoint() {
    let app = TestApp::new(FakeParser::Absent);
    app.add_log("a.txt", 100);

    let (status, body) = app.get("/api/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["log_dir_exists"], true);
    assert_eq!(body["log_files_found"], 1);
    assert_eq!(body["current_config"]["log_file_path"], Value::Null);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new(FakeParser::Absent);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/config/")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();
    let response = app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn test_shutdown_endpoint() {
    let app = TestApp::new(FakeParser::Absent);

    let request = Request::post("/api/shutdown").body(Body::empty()).unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "shutting down"}));
}
