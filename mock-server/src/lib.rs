use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

pub use axum::http::StatusCode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// What `GET /posts` answers with.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Fixture {
    pub fn posts(posts: &[Post]) -> Self {
        let body = serde_json::to_string(posts).unwrap_or_else(|_| "[]".to_string());
        Self::raw(StatusCode::OK, body)
    }

    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self::raw(status, "")
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Clone, Debug)]
pub struct MockState {
    fixture: Arc<Fixture>,
    hits: Arc<AtomicUsize>,
}

impl MockState {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `GET /posts` requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A handful of posts shaped like the public jsonplaceholder data.
pub fn sample_posts() -> Vec<Post> {
    (1..=5)
        .map(|id| Post {
            user_id: (id - 1) / 2 + 1,
            id,
            title: format!("post number {id}"),
            body: format!("body of post {id}\nsecond line"),
        })
        .collect()
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/posts", get(list_posts))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn list_posts(State(state): State<MockState>) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst) + 1;
    let fixture = &state.fixture;
    debug!(hit, status = fixture.status.as_u16(), "serving /posts");
    if !fixture.delay.is_zero() {
        tokio::time::sleep(fixture.delay).await;
    }
    (
        fixture.status,
        [(header::CONTENT_TYPE, "application/json")],
        fixture.body.clone(),
    )
        .into_response()
}
