#![allow(dead_code)]

//! Test infrastructure for bc-server API tests

use bc_dispatch::{
    BroadcastEngine, ChatId, CustomerResolver, DeliveryLedger, DispatchMetrics, EngineSettings,
    ReadinessSignal, RetryConfig, SecondaryStore, SendOptions, SqliteStore, Transport,
    TransportError, TransportMessageId,
};
use bc_dispatch::transport::TransportResult;
use bc_server::AppState;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tokio::sync::watch;
use tower::ServiceExt;

/// Gateway stand-in: every number resolves unless listed as unregistered
pub struct FakeTransport {
    pub signal: ReadinessSignal,
    pub unregistered: HashSet<String>,
    pub failing: HashSet<String>,
}

impl FakeTransport {
    pub fn ready() -> Self {
        Self {
            signal: ReadinessSignal::new(true),
            unregistered: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            signal: ReadinessSignal::new(false),
            ..Self::ready()
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    fn readiness(&self) -> watch::Receiver<bool> {
        self.signal.subscribe()
    }

    async fn resolve_routable_id(&self, number: &str) -> TransportResult<Option<ChatId>> {
        if self.unregistered.contains(number) {
            return Ok(None);
        }
        Ok(Some(ChatId(number.to_string())))
    }

    async fn send(
        &self,
        chat_id: &ChatId,
        _body: &str,
        _options: &SendOptions,
    ) -> TransportResult<Option<TransportMessageId>> {
        if self.failing.contains(chat_id.as_str()) {
            return Err(TransportError::rejected(500, "gateway exploded"));
        }
        Ok(Some(format!("msg-{}", chat_id)))
    }
}

pub async fn create_test_pool() -> SqlitePool {
    bc_db::open_in_memory()
        .await
        .expect("Failed to create test database")
}

/// AppState over an in-memory database with no sheet configured
pub async fn create_test_app_state(transport: Option<FakeTransport>) -> AppState {
    let pool = create_test_pool().await;
    let metrics = DispatchMetrics::new();
    let store: Arc<dyn SecondaryStore> = Arc::new(SqliteStore::new(pool.clone()));

    let resolver = Arc::new(CustomerResolver::new(
        None,
        Some(Arc::clone(&store)),
        Duration::from_secs(60),
        metrics.clone(),
    ));
    let ledger = DeliveryLedger::new(Some(store), RetryConfig::default(), metrics.clone());
    let settings = EngineSettings {
        default_timeout: Duration::from_millis(50),
        media_timeout: Duration::from_millis(50),
        default_concurrency: 2,
        max_recipients: 5,
    };

    let engine = BroadcastEngine::new(
        transport.map(|t| Arc::new(t) as Arc<dyn Transport>),
        resolver,
        ledger,
        settings,
        metrics,
    );

    AppState::new(engine, pool)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> (http::StatusCode, serde_json::Value) {
    let response: Response<Body> = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
