#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use jobwatch_client::{ClientConfig, JobChecker, Notifier, StatusApi};

/// One canned response from the mock backend.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: &'static str,
    pub delay: Option<Duration>,
}

pub fn reply(status: u16, body: &'static str) -> Reply {
    Reply {
        status,
        body,
        delay: None,
    }
}

pub fn slow_reply(status: u16, body: &'static str, delay: Duration) -> Reply {
    Reply {
        status,
        body,
        delay: Some(delay),
    }
}

#[derive(Clone)]
struct MockState {
    replies: Arc<Vec<Reply>>,
    hits: Arc<AtomicUsize>,
    seen_ids: Arc<Mutex<Vec<String>>>,
}

/// In-process stand-in for the job-status backend.
///
/// Serves `GET /check/{id}` from a list of replies in order; once the
/// list is exhausted the last reply repeats.
pub struct MockBackend {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    seen_ids: Arc<Mutex<Vec<String>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    pub async fn start(replies: Vec<Reply>) -> Self {
        assert!(!replies.is_empty(), "mock backend needs at least one reply");

        let state = MockState {
            replies: Arc::new(replies),
            hits: Arc::new(AtomicUsize::new(0)),
            seen_ids: Arc::new(Mutex::new(Vec::new())),
        };
        let hits = state.hits.clone();
        let seen_ids = state.seen_ids.clone();

        let app = Router::new()
            .route("/check/{id}", get(check_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            seen_ids,
            shutdown: Some(shutdown_tx),
        }
    }

    /// Number of requests the backend has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Job ids extracted from the request paths, in arrival order.
    pub fn seen_ids(&self) -> Vec<String> {
        self.seen_ids.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

async fn check_handler(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    state.seen_ids.lock().unwrap().push(id);
    let n = state.hits.fetch_add(1, Ordering::SeqCst);
    let reply = state.replies[n.min(state.replies.len() - 1)].clone();

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap();
    (status, [(CONTENT_TYPE, "application/json")], reply.body).into_response()
}

/// Base URL of a port nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Notifier that keeps every alert for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Checker against `base_url` that records its alerts.
pub fn recording_checker(
    base_url: &str,
) -> (JobChecker<Arc<RecordingNotifier>>, Arc<RecordingNotifier>) {
    recording_checker_with(&ClientConfig::with_base_url(base_url))
}

/// Same as [`recording_checker`] with full control over the config.
pub fn recording_checker_with(
    config: &ClientConfig,
) -> (JobChecker<Arc<RecordingNotifier>>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let api = StatusApi::new(config).unwrap();
    (JobChecker::new(api, notifier.clone()), notifier)
}
