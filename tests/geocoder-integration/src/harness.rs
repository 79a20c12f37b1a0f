use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::task::JoinHandle;

/// One scripted answer of the mock search service.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the mock service saw it, after query decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeenRequest {
    pub format: Option<String>,
    pub q: Option<String>,
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

/// Local stand-in for the place-search service. Replies are keyed by the
/// decoded `q` parameter; unknown places get an empty candidate list.
pub struct MockSearchServer {
    base_url: String,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockSearchServer {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = Router::new()
            .route("/search", get(search))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock search server");
        let addr = listener.local_addr().expect("bound listener has an address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock search server failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    /// URL to hand to a geocoder.
    pub fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn reply(&self, place: &str, reply: Reply) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert(place.to_string(), reply);
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

impl Drop for MockSearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn search(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let seen = SeenRequest {
        format: params.get("format").cloned(),
        q: params.get("q").cloned(),
    };
    tracing::debug!(?seen, "Mock search request");
    state.seen.lock().unwrap().push(seen.clone());

    let reply = seen
        .q
        .as_ref()
        .and_then(|q| state.replies.lock().unwrap().get(q).cloned());
    match reply {
        Some(reply) => {
            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            (reply.status, reply.body)
        }
        None => (StatusCode::OK, "[]".to_string()),
    }
}

/// An endpoint on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("bound listener has an address");
    drop(listener);
    format!("http://{}/search", addr)
}
