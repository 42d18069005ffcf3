//! Domain types for the posts endpoint.
//!
//! # Design
//! `Post` mirrors the mock-server's schema but is defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single post returned by the endpoint.
///
/// Only ever produced by decoding a complete JSON object; a missing or
/// mistyped field fails the whole decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}
