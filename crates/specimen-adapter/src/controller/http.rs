//! HTTP routes
//!
//! ```text
//! GET   /                          liveness
//! GET   /api/samples               list the caller's samples
//! POST  /api/samples               register a sample
//! PATCH /api/samples/:id/collect   mark a sample as collected
//! ```

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use specimen_domain::SampleId;
use specimen_usecase::{Clock, SampleLifecycle};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::dto::{
    CollectBody, CreateSampleBody, ListQuery, MessageBody, SampleView, SampleWithHospitalView,
};
use super::error::ApiError;
use super::identity::resolve_agent;
use super::middleware::log_requests;
use crate::repository::InMemoryStore;

/// Lifecycle service as wired for HTTP serving
pub type Lifecycle = SampleLifecycle<InMemoryStore, Arc<dyn Clock>>;

/// Shared state for the axum application
#[derive(Clone)]
pub struct AppState {
    lifecycle: Arc<Lifecycle>,
    identity_header: HeaderName,
}

impl AppState {
    pub fn new(lifecycle: Lifecycle, identity_header: HeaderName) -> Self {
        Self {
            lifecycle: Arc::new(lifecycle),
            identity_header,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/samples", get(list_samples).post(create_sample))
        .route("/api/samples/:id/collect", patch(collect_sample))
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server ready and accepting connections");

    axum::serve(listener, build_router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn root() -> Json<MessageBody> {
    Json(MessageBody::new("Sample Tracking API is running!"))
}

async fn list_samples(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<SampleWithHospitalView>>, ApiError> {
    let Query(query) = query?;
    let agent = resolve_agent(&headers, &state.identity_header, query.agent_id)?;

    let rows = state.lifecycle.list_by_agent(&agent).await?;
    Ok(Json(rows.iter().map(Into::into).collect()))
}

async fn create_sample(
    State(state): State<AppState>,
    body: Result<Json<CreateSampleBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SampleView>), ApiError> {
    let Json(body) = body?;

    let sample = state.lifecycle.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json((&sample).into())))
}

async fn collect_sample(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SampleView>, ApiError> {
    let Path(id) = path?;
    // The body is optional: callers behind the identity gateway send none
    let body: CollectBody = if body.is_empty() {
        CollectBody::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };
    let agent = resolve_agent(&headers, &state.identity_header, body.agent_id)?;

    let sample = state.lifecycle.mark_collected(&SampleId::new(id), &agent).await?;
    Ok(Json((&sample).into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::identity::DEFAULT_IDENTITY_HEADER;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use specimen_domain::{Agent, AgentId, AgentRepository, HospitalRepository, NewHospital};
    use specimen_usecase::ManualClock;
    use tower::ServiceExt;

    struct Fixture {
        router: Router,
        hospital_id: String,
    }

    async fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let hospital = store
            .insert_hospital(NewHospital {
                name: "City General Hospital".to_string(),
                address: "123 Health St, Medville".to_string(),
            })
            .await
            .unwrap();
        for id in ["a-001", "a-002"] {
            store
                .insert_agent(Agent::new(AgentId::new(id), "Agent", "agent@example.com"))
                .await
                .unwrap();
        }

        let clock: Arc<dyn Clock> = Arc::new(ManualClock::starting_at(1_700_000_000_000));
        let state = AppState::new(
            SampleLifecycle::new(store, clock),
            HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        );

        Fixture {
            router: build_router(state),
            hospital_id: hospital.id().to_string(),
        }
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn collect_as(sample_id: &str, agent: &str) -> Request<Body> {
        Request::builder()
            .method("PATCH")
            .uri(format!("/api/samples/{}/collect", sample_id))
            .header(DEFAULT_IDENTITY_HEADER, agent)
            .body(Body::empty())
            .unwrap()
    }

    async fn create(fx: &Fixture, agent: &str) -> Value {
        let (status, body) = send(
            &fx.router,
            post_json(
                "/api/samples",
                json!({
                    "patientName": "Jane Doe",
                    "sampleType": "blood",
                    "hospitalId": fx.hospital_id,
                    "agentId": agent,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_root_reports_liveness() {
        let fx = fixture().await;

        let (status, body) = send(&fx.router, Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Sample Tracking API is running!");
    }

    #[tokio::test]
    async fn test_create_then_collect_scenario() {
        let fx = fixture().await;

        let created = create(&fx, "a-001").await;
        assert_eq!(created["status"], "PENDING");
        assert!(created["collectedAt"].is_null());
        let id = created["id"].as_str().unwrap().to_string();

        let (status, collected) = send(&fx.router, collect_as(&id, "a-001")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(collected["status"], "COLLECTED");
        assert!(collected["collectedAt"].is_string());

        let (status, again) = send(&fx.router, collect_as(&id, "a-001")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(again["message"], "Sample not found or you do not have permission to update it.");

        let (status, _) = send(&fx.router, collect_as(&id, "a-002")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_other_agent_and_unknown_sample_look_the_same() {
        let fx = fixture().await;
        let created = create(&fx, "a-001").await;
        let id = created["id"].as_str().unwrap();

        let not_mine = send(&fx.router, collect_as(id, "a-002")).await;
        let unknown = send(&fx.router, collect_as("no-such-sample", "a-002")).await;

        assert_eq!(not_mine, unknown);
    }

    #[tokio::test]
    async fn test_collect_accepts_legacy_body_identity() {
        let fx = fixture().await;
        let created = create(&fx, "a-001").await;
        let id = created["id"].as_str().unwrap();

        let request = Request::builder()
            .method("PATCH")
            .uri(format!("/api/samples/{}/collect", id))
            .header("content-type", "application/json")
            .body(Body::from(json!({ "agentId": "a-001" }).to_string()))
            .unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "COLLECTED");
    }

    #[tokio::test]
    async fn test_collect_without_identity() {
        let fx = fixture().await;

        let request = Request::builder()
            .method("PATCH")
            .uri("/api/samples/s-001/collect")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Agent ID is required.");
    }

    #[tokio::test]
    async fn test_list_returns_only_own_samples_with_hospital() {
        let fx = fixture().await;
        create(&fx, "a-001").await;
        create(&fx, "a-001").await;
        create(&fx, "a-002").await;

        let request = Request::get("/api/samples")
            .header(DEFAULT_IDENTITY_HEADER, "a-001")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row["agentId"], "a-001");
            assert_eq!(row["hospital"]["name"], "City General Hospital");
        }
    }

    #[tokio::test]
    async fn test_list_by_query_parameter() {
        let fx = fixture().await;

        let request = Request::get("/api/samples?agentId=a-002").body(Body::empty()).unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let request = Request::get("/api/samples").body(Body::empty()).unwrap();
        let (status, _) = send(&fx.router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_validation_and_reference_errors() {
        let fx = fixture().await;

        let (status, body) = send(
            &fx.router,
            post_json("/api/samples", json!({ "patientName": "Jane Doe" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Missing required field: sampleType.");

        let (status, _) = send(
            &fx.router,
            post_json(
                "/api/samples",
                json!({
                    "patientName": "Jane Doe",
                    "sampleType": "blood",
                    "hospitalId": "no-such-hospital",
                    "agentId": "a-001",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let fx = fixture().await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/samples")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_query_is_json_bad_request() {
        let fx = fixture().await;

        let request = Request::get("/api/samples?agentId=a-001&agentId=a-002")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&fx.router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("agentId"));
    }

    #[tokio::test]
    async fn test_malformed_path_is_json_bad_request() {
        let fx = fixture().await;

        let (status, body) = send(&fx.router, collect_as("%FF", "a-001")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }
}
