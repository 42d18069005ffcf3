//! Async client core for a JSON posts endpoint.
//!
//! # Overview
//! Fetches a list of posts with one HTTP GET, decodes it and publishes the
//! result as observable state for a list renderer.
//!
//! # Design
//! - `PostFetcher` splits the operation into `build_list_posts` (produces the
//!   request) and `parse_list_posts` (consumes the response); `fetch` runs
//!   them around an injected `HttpTransport`.
//! - `ReqwestTransport` is the production transport; tests plug in fakes.
//! - `PostListStore` runs the fetch once per instance and exposes the posts
//!   through a `watch` channel. Fetch errors are logged, never published.
//! - `Post` is defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::PostFetcher;
pub use config::{FetchConfig, DEFAULT_ENDPOINT};
pub use error::{FetchError, TransportError};
pub use http::{HttpRequest, HttpResponse, HttpTransport};
pub use store::{FetchPhase, PostListStore};
pub use transport::ReqwestTransport;
pub use types::Post;
