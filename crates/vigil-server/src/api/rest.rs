//! REST API implementation

use crate::bronze::BronzeArchive;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use vigil_core::{Article, Buy, EventKind, Login, Order, Scroll, User};
use vigil_engine::FraudService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FraudService>,
    pub archive: Arc<BronzeArchive>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Ingest acknowledgement
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: String,
}

/// Create the REST API router
pub fn create_router(service: Arc<FraudService>, archive: Arc<BronzeArchive>) -> Router {
    let state = AppState { service, archive };

    Router::new()
        .route("/health", get(health))
        .route("/v1/events/:kind", post(ingest))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Event ingest endpoint
///
/// Archives the raw event to the bronze layer, then hands behavioral
/// events to the escalation engine. Engine failures are soft by contract,
/// so ingest answers 202 whenever the event itself is well-formed.
async fn ingest(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<IngestResponse>), ServerError> {
    let kind = EventKind::from_name(&kind).map_err(|e| ServerError::NotFound(e.to_string()))?;
    let user_id = validate_event(kind, &payload)?;

    info!("Received {} event", kind.name());

    if let Err(e) = state.archive.append(kind, &payload).await {
        error!("Bronze archive append failed for {}: {}", kind.name(), e);
    }

    if kind.is_behavioral() {
        if let Some(user_id) = &user_id {
            state.service.process_event(user_id, &payload).await;
        }
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            status: "accepted".to_string(),
        }),
    ))
}

/// Check the payload against the typed model for its kind and return the
/// user identifier for behavioral kinds
fn validate_event(
    kind: EventKind,
    payload: &serde_json::Value,
) -> Result<Option<String>, ServerError> {
    fn decode<T: DeserializeOwned>(payload: &serde_json::Value) -> Result<T, ServerError> {
        serde_json::from_value(payload.clone())
            .map_err(|e| ServerError::InvalidRequest(e.to_string()))
    }

    match kind {
        EventKind::User => {
            decode::<User>(payload)?;
            Ok(None)
        }
        EventKind::Article => {
            decode::<Article>(payload)?;
            Ok(None)
        }
        EventKind::Order => Ok(Some(decode::<Order>(payload)?.user_id)),
        EventKind::Login => Ok(Some(decode::<Login>(payload)?.user_id)),
        EventKind::Buy => Ok(Some(decode::<Buy>(payload)?.user_id)),
        EventKind::Scroll => Ok(Some(decode::<Scroll>(payload)?.user_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;
    use vigil_engine::{MemoryVerdictSink, MemoryWindowStore};
    use vigil_oracle::{AnalystConfig, BehaviorAnalyst, MockProvider};

    struct Harness {
        router: Router,
        store: MemoryWindowStore,
        _dir: tempfile::TempDir,
        bronze_root: std::path::PathBuf,
    }

    fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let bronze_root = dir.path().to_path_buf();
        let store = MemoryWindowStore::new();

        let analyst = BehaviorAnalyst::new(
            Arc::new(MockProvider::new()),
            AnalystConfig::new("mistral:latest".to_string()),
        );
        let service = FraudService::new(
            Arc::new(store.clone()),
            analyst,
            Arc::new(MemoryVerdictSink::new()),
        );
        let archive = BronzeArchive::new(bronze_root.clone());

        Harness {
            router: create_router(Arc::new(service), Arc::new(archive)),
            store,
            _dir: dir,
            bronze_root,
        }
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn login_payload() -> serde_json::Value {
        serde_json::json!({
            "user_id": "u1",
            "timestamp": "2024-05-01T12:00:00Z",
            "ip_address": "10.0.0.1",
            "device_id": "dev-1",
            "success": true
        })
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let harness = harness();

        let response = harness
            .router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_login_ingest_archives_and_tracks() {
        let harness = harness();

        let response = harness
            .router
            .oneshot(post_json("/v1/events/login", login_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        // Archived to bronze
        let content =
            std::fs::read_to_string(harness.bronze_root.join("login.jsonl")).unwrap();
        assert!(content.contains("\"user_id\":\"u1\""));

        // Tracked in the fraud window
        assert_eq!(harness.store.window_len("u1"), 1);
    }

    #[tokio::test]
    async fn test_user_ingest_archives_without_tracking() {
        let harness = harness();

        let payload = serde_json::json!({
            "user_id": "u1",
            "email": "u1@example.com",
            "phone": "555-0100",
            "address": "1 Main St",
            "registration_date": "2024-01-01T00:00:00Z"
        });

        let response = harness
            .router
            .oneshot(post_json("/v1/events/user", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(harness.bronze_root.join("user.jsonl").exists());
        assert_eq!(harness.store.window_len("u1"), 0);
    }

    #[tokio::test]
    async fn test_unknown_kind_is_not_found() {
        let harness = harness();

        let response = harness
            .router
            .oneshot(post_json("/v1/events/payment", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_event_is_bad_request() {
        let harness = harness();

        // Missing required login fields
        let response = harness
            .router
            .oneshot(post_json(
                "/v1/events/login",
                serde_json::json!({"user_id": "u1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(harness.store.window_len("u1"), 0);
    }

    #[tokio::test]
    async fn test_extra_fields_pass_through() {
        let harness = harness();

        let mut payload = login_payload();
        payload["user_agent"] = serde_json::json!("Python/3.12 aiohttp/3.9.1");

        let response = harness
            .router
            .oneshot(post_json("/v1/events/login", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);

        // Opaque pass-through: the archived record keeps the extra field
        let content =
            std::fs::read_to_string(harness.bronze_root.join("login.jsonl")).unwrap();
        assert!(content.contains("user_agent"));
    }
}
