//! Local HTTP targets for integration tests
#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// A running target server and the number of requests it has seen
pub struct Target {
    pub addr: SocketAddr,
    hits: Arc<AtomicU64>,
}

impl Target {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn ok(State(hits): State<Arc<AtomicU64>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(10)).await;
    "ok"
}

async fn error(State(hits): State<Arc<AtomicU64>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow(State(hits): State<Arc<AtomicU64>>) -> &'static str {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    "late"
}

async fn redirect(State(hits): State<Arc<AtomicU64>>) -> Redirect {
    hits.fetch_add(1, Ordering::SeqCst);
    Redirect::to("/ok")
}

/// Accepts only a JSON body carrying the expected token header
async fn echo(State(hits): State<Arc<AtomicU64>>, headers: HeaderMap, body: String) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    let json = headers
        .get("content-type")
        .is_some_and(|value| value == "application/json");
    let token = headers.get("x-token").is_some_and(|value| value == "secret");
    if json && token && body == r#"{"name":"load"}"# {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    }
}

/// Start a target on an ephemeral local port
pub async fn start_target() -> anyhow::Result<Target> {
    let hits = Arc::new(AtomicU64::new(0));
    let app = Router::new()
        .route("/ok", get(ok))
        .route("/error", get(error))
        .route("/slow", get(slow))
        .route("/redirect", get(redirect))
        .route("/echo", post(echo))
        .with_state(Arc::clone(&hits));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("Target server error: {}", e);
        }
    });

    Ok(Target { addr, hits })
}

/// An address with nothing listening on it
pub async fn closed_port() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}
