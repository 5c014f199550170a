use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

/// A request the mock scrape service received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub body: Value,
    pub authorization: Option<String>,
}

/// Canned `/v0/scrape` behaviour.
#[derive(Clone)]
pub struct MockScrape {
    status: StatusCode,
    body: String,
    delay: Duration,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl MockScrape {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        MockScrape {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            delay: Duration::ZERO,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    /// Serves on an ephemeral port and returns the scrape endpoint URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v0/scrape", post(scrape_handler))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/v0/scrape", addr)
    }
}

async fn scrape_handler(
    State(mock): State<MockScrape>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.seen.lock().unwrap().push(Recorded { body, authorization });

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    (mock.status, mock.body.clone())
}

/// An endpoint on a port nothing listens on.
pub fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v0/scrape", addr)
}
