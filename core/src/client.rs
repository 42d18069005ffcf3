//! Request builder, response parser and the async fetch built from them.
//!
//! # Design
//! `build_list_posts` and `parse_list_posts` are pure and do not touch the
//! network. `fetch` glues them together through the injected `HttpTransport`
//! and makes exactly one attempt.

use tracing::debug;

use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::Post;

/// Fetches and decodes the post list through an injected transport.
#[derive(Debug, Clone)]
pub struct PostFetcher<T> {
    transport: T,
}

impl<T: HttpTransport> PostFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_list_posts(&self, url: &str) -> HttpRequest {
        HttpRequest {
            url: url.to_string(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, FetchError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Single GET + decode. Posts come back in the order the server sent them.
    pub async fn fetch(&self, url: &str) -> Result<Vec<Post>, FetchError> {
        let request = self.build_list_posts(url);
        debug!(url = %request.url, "requesting posts");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "posts response received");
        self.parse_list_posts(response)
    }
}

/// Accept any 2xx status.
fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(FetchError::BadStatus(response.status))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::error::TransportError;

    /// Answers every request with the same canned response and records calls.
    struct CannedTransport {
        response: Result<HttpResponse, String>,
        calls: Arc<AtomicUsize>,
        last_url: std::sync::Mutex<Option<String>>,
    }

    impl CannedTransport {
        fn ok(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: Arc::new(AtomicUsize::new(0)),
                last_url: std::sync::Mutex::new(None),
            }
        }

        fn unreachable() -> Self {
            Self {
                response: Err("connection refused".to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
                last_url: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().expect("last_url mutex poisoned") = Some(request.url);
            self.response.clone().map_err(TransportError)
        }
    }

    fn fetcher() -> PostFetcher<CannedTransport> {
        PostFetcher::new(CannedTransport::ok(200, "[]"))
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_posts_produces_get_with_accept_header() {
        let req = fetcher().build_list_posts("http://localhost:3000/posts");
        assert_eq!(req.url, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn parse_list_posts_single_post() {
        let posts = fetcher()
            .parse_list_posts(response(
                200,
                r#"[{"userId":1,"id":1,"title":"t","body":"b"}]"#,
            ))
            .unwrap();
        assert_eq!(
            posts,
            vec![Post {
                user_id: 1,
                id: 1,
                title: "t".to_string(),
                body: "b".to_string(),
            }]
        );
    }

    #[test]
    fn parse_list_posts_preserves_server_order() {
        let body = r#"[
            {"userId":2,"id":9,"title":"nine","body":""},
            {"userId":1,"id":3,"title":"three","body":""},
            {"userId":1,"id":5,"title":"five","body":""}
        ]"#;
        let posts = fetcher().parse_list_posts(response(200, body)).unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn parse_list_posts_empty_array() {
        let posts = fetcher().parse_list_posts(response(200, "[]")).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn parse_list_posts_accepts_any_2xx() {
        assert!(fetcher().parse_list_posts(response(203, "[]")).is_ok());
        assert!(fetcher().parse_list_posts(response(299, "[]")).is_ok());
    }

    #[test]
    fn parse_list_posts_not_found() {
        let err = fetcher().parse_list_posts(response(404, "")).unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(404)));
    }

    #[test]
    fn parse_list_posts_server_error_ignores_body() {
        let err = fetcher()
            .parse_list_posts(response(500, r#"[{"userId":1,"id":1,"title":"t","body":"b"}]"#))
            .unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(500)));
    }

    #[test]
    fn parse_list_posts_redirect_is_bad_status() {
        let err = fetcher().parse_list_posts(response(300, "[]")).unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(300)));
    }

    #[test]
    fn parse_list_posts_object_instead_of_array() {
        let err = fetcher()
            .parse_list_posts(response(200, r#"{"not": "an array"}"#))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn parse_list_posts_bad_json() {
        let err = fetcher()
            .parse_list_posts(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn parse_list_posts_one_bad_element_fails_everything() {
        let body = r#"[
            {"userId":1,"id":1,"title":"ok","body":"ok"},
            {"userId":1,"id":2,"title":"missing body"}
        ]"#;
        let err = fetcher().parse_list_posts(response(200, body)).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn fetch_executes_one_request_against_url() {
        let fetcher = PostFetcher::new(CannedTransport::ok(
            200,
            r#"[{"userId":1,"id":1,"title":"t","body":"b"}]"#,
        ));
        let posts = fetcher.fetch("http://example.test/posts").await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            fetcher
                .transport()
                .last_url
                .lock()
                .unwrap()
                .as_deref(),
            Some("http://example.test/posts")
        );
    }

    #[tokio::test]
    async fn fetch_maps_missing_response_to_transport() {
        let fetcher = PostFetcher::new(CannedTransport::unreachable());
        let err = fetcher.fetch("http://example.test/posts").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_does_not_retry_bad_status() {
        let fetcher = PostFetcher::new(CannedTransport::ok(503, ""));
        let err = fetcher.fetch("http://example.test/posts").await.unwrap_err();
        assert!(matches!(err, FetchError::BadStatus(503)));
        assert_eq!(fetcher.transport().calls.load(Ordering::SeqCst), 1);
    }
}
