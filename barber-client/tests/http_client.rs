// barber-client/tests/http_client.rs
// Client behaviour against an in-process backend

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use barber_client::{
    BookingApi, ClientConfig, ClientError, FileTokenStore, HttpClient, MemoryTokenStore, Navigator,
    ServiceCreate, ToastLevel, ToastQueue, TokenStore, LOGIN_PATH,
};
use serde_json::{json, Value};
use shared::{Decimal, DEFAULT_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_string());
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer good-token")
}

async fn services(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Sesión expirada" })));
    }
    (
        StatusCode::OK,
        Json(json!([
            { "id": 1, "name": "Corte Clásico", "description": "Tijera y navaja", "duration": 30, "price": 2500, "active": true },
            { "id": 2, "name": "Fade Premium", "duration": 45, "price": 3200 }
        ])),
    )
}

async fn create_service(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut created = body;
    created["id"] = json!(99);
    (StatusCode::CREATED, Json(created))
}

async fn busy() -> (StatusCode, Json<Value>) {
    (StatusCode::CONFLICT, Json(json!({ "error": "Horario ocupado" })))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>")
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/servicios", get(services).post(create_service))
        .route("/turnos", get(busy).post(busy))
        .route("/usuarios", get(broken))
        .route("/vacio", get(empty));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct Harness {
    client: HttpClient,
    toasts: Arc<ToastQueue>,
    navigator: Arc<RecordingNavigator>,
    tokens: Arc<MemoryTokenStore>,
}

fn harness(base_url: &str, token: Option<&str>) -> Harness {
    let toasts = Arc::new(ToastQueue::new());
    let navigator = Arc::new(RecordingNavigator::default());
    let tokens = Arc::new(MemoryTokenStore::new(token.map(str::to_string)));
    let client = ClientConfig::new(base_url)
        .with_timeout(5)
        .build_http_client()
        .unwrap()
        .with_token_store(tokens.clone())
        .with_notifier(toasts.clone())
        .with_navigator(navigator.clone());
    Harness {
        client,
        toasts,
        navigator,
        tokens,
    }
}

#[tokio::test]
async fn test_list_services_sends_bearer_token() {
    let base = spawn_backend().await;
    let h = harness(&base, Some("good-token"));

    let services = h.client.list_services().await.unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].price, Decimal::from(2500));
    assert!(services[1].is_active);
    assert_eq!(services[1].description, "");
    assert!(h.toasts.snapshot().is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_token_and_redirects() {
    let base = spawn_backend().await;
    let h = harness(&base, Some("stale-token"));

    let err = h.client.list_services().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Sesión expirada");

    assert!(h.tokens.load().is_none());
    assert_eq!(h.navigator.visited.lock().unwrap().as_slice(), [LOGIN_PATH]);

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Error);
    assert_eq!(toasts[0].message, "Sesión expirada");
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let base = spawn_backend().await;
    let h = harness(&base, Some("good-token"));

    let err = h.client.list_appointments().await.unwrap_err();
    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(message, "Horario ocupado");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.toasts.drain()[0].message, "Horario ocupado");
    // Only 401 touches the session
    assert!(h.tokens.load().is_some());
    assert!(h.navigator.visited.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_without_json_body_uses_default_message() {
    let base = spawn_backend().await;
    let h = harness(&base, None);

    let err = h.client.list_staff().await.unwrap_err();
    assert_eq!(err.user_message(), DEFAULT_ERROR_MESSAGE);
    assert_eq!(h.toasts.drain()[0].message, DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_post_toasts_success_message() {
    let base = spawn_backend().await;
    let h = harness(&base, Some("good-token"));

    let payload = ServiceCreate {
        name: "Tratamiento Capilar".to_string(),
        description: "Hidratación".to_string(),
        duration: 45,
        price: Decimal::from(3800),
        is_active: true,
    };
    let created = h.client.create_service(&payload).await.unwrap();
    assert_eq!(created.id, 99);
    assert_eq!(created.name, "Tratamiento Capilar");

    let toasts = h.toasts.drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].level, ToastLevel::Success);
}

#[tokio::test]
async fn test_no_content_yields_empty_value() {
    let base = spawn_backend().await;
    let h = harness(&base, None);

    let value: Option<Value> = h.client.get("/vacio").await.unwrap();
    assert!(value.is_none());

    let _: () = h.client.get("/vacio").await.unwrap();
    assert!(h.toasts.snapshot().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_reports_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let h = harness(&format!("http://{addr}"), None);
    let err = h.client.list_branches().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
    assert_eq!(h.toasts.drain()[0].message, NETWORK_ERROR_MESSAGE);
}

#[test]
fn test_file_token_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp_dir.path().join("session"), "token.json");

    assert!(store.load().is_none());
    store.save("abc").unwrap();
    assert!(store.exists());
    assert_eq!(store.load().as_deref(), Some("abc"));

    store.clear().unwrap();
    assert!(!store.exists());
    assert!(store.load().is_none());
    // Clearing twice is fine
    store.clear().unwrap();
}
