//! Todoist REST backend.
//!
//! The MCP tools never talk HTTP themselves; they go through the
//! [`TodoistApi`] trait so tests can point them at a stub server.
//!
//! - `api`: the trait every backend implements
//! - `client`: reqwest-backed implementation for the Todoist API v1
//! - `models`: request/response payloads
//! - `error`: backend error type

mod api;
mod client;
mod error;
mod models;


pub use api::TodoistApi;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TodoistClient};
pub use error::{ApiError, ApiResult};
pub use models::*;
