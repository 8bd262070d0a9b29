#![allow(dead_code)]
pub mod postgres;

use attendance_backend::{
    config::Config,
    repositories::MemoryAttendanceStore,
    routes,
    services::SessionLedger,
    state::AppState,
    utils::time::ManualClock,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub ledger: Arc<SessionLedger>,
    pub store: Arc<MemoryAttendanceStore>,
    pub clock: Arc<ManualClock>,
}

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
}

pub fn test_config() -> Config {
    Config {
        history_default_limit: 5,
        ..Config::default()
    }
}

pub fn test_ledger() -> (Arc<SessionLedger>, Arc<MemoryAttendanceStore>, Arc<ManualClock>) {
    let store = Arc::new(MemoryAttendanceStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let ledger = Arc::new(SessionLedger::new(store.clone(), clock.clone()));
    (ledger, store, clock)
}

pub fn test_app() -> TestApp {
    let (ledger, store, clock) = test_ledger();
    let router = routes::app(AppState::new(ledger.clone(), test_config()));
    TestApp {
        router,
        ledger,
        store,
        clock,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        user: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        let request = builder.body(Body::empty()).expect("build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("call router");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
