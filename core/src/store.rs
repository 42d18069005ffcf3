//! Observable post list that owns the lifecycle of one fetch.
//!
//! # Design
//! Construction spawns a single task that runs `PostFetcher::fetch` once.
//! State is published through `watch` channels, so the task is the only
//! writer and readers never lock. The task holds a `Weak` to the shared state
//! and upgrades it before applying the result; once the store is dropped the
//! upgrade fails and the result is discarded. Dropping the store also aborts
//! the task, which cancels the request if it is still pending. A guard owned
//! by the task marks a live store `Idle` however the task ends, so `settled`
//! also returns when the transport panics.

use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::PostFetcher;
use crate::error::FetchError;
use crate::http::HttpTransport;
use crate::types::Post;

/// Where a store is in its single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Task spawned but not yet polled.
    Pending,
    /// Request issued, waiting for the response.
    InFlight,
    /// Fetch finished. Posts hold the decoded list, or are untouched if it
    /// failed.
    Idle,
}

struct Shared {
    posts: watch::Sender<Vec<Post>>,
    phase: watch::Sender<FetchPhase>,
}

/// Holds the current list of posts and fetches it exactly once.
///
/// Must be created inside a tokio runtime.
pub struct PostListStore {
    shared: Arc<Shared>,
    task: JoinHandle<()>,
}

impl PostListStore {
    pub fn new<T>(fetcher: PostFetcher<T>, endpoint: impl Into<String>) -> Self
    where
        T: HttpTransport + 'static,
    {
        let (posts, _) = watch::channel(Vec::new());
        let (phase, _) = watch::channel(FetchPhase::Pending);
        let shared = Arc::new(Shared { posts, phase });

        let endpoint = endpoint.into();
        let weak = Arc::downgrade(&shared);
        let task = tokio::spawn(async move {
            let _settle = SettleOnExit(weak.clone());
            {
                // No strong handle may be held across the await below.
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                shared.phase.send_replace(FetchPhase::InFlight);
            }
            let result = fetcher.fetch(&endpoint).await;
            apply(&weak, result);
        });

        Self { shared, task }
    }

    /// Snapshot of the current posts.
    pub fn posts(&self) -> Vec<Post> {
        self.shared.posts.borrow().clone()
    }

    /// Receiver notified each time the post list is replaced.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Post>> {
        self.shared.posts.subscribe()
    }

    pub fn phase(&self) -> FetchPhase {
        *self.shared.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<FetchPhase> {
        self.shared.phase.subscribe()
    }

    /// Resolves once the fetch has finished, whatever its outcome.
    pub async fn settled(&self) {
        let mut phase = self.shared.phase.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = phase.wait_for(|p| *p == FetchPhase::Idle).await;
    }
}

impl Drop for PostListStore {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Applies a fetch result to the store if it is still alive.
fn apply(shared: &Weak<Shared>, result: Result<Vec<Post>, FetchError>) {
    let Some(shared) = shared.upgrade() else {
        debug!("post list store released before fetch completed, discarding result");
        return;
    };

    match result {
        Ok(posts) => {
            info!(count = posts.len(), "publishing posts");
            shared.posts.send_replace(posts);
        }
        Err(err) => warn!(error = %err, "failed to fetch posts"),
    }
    mark_idle(&shared);
}

fn mark_idle(shared: &Shared) {
    shared.phase.send_if_modified(|phase| {
        if *phase == FetchPhase::Idle {
            return false;
        }
        *phase = FetchPhase::Idle;
        true
    });
}

/// Moves a live store to `Idle` when the fetch task ends without reaching
/// `apply`, e.g. because the transport panicked.
struct SettleOnExit(Weak<Shared>);

impl Drop for SettleOnExit {
    fn drop(&mut self) {
        if let Some(shared) = self.0.upgrade() {
            mark_idle(&shared);
        }
    }
}
