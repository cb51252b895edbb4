//! `shopadmin-client`
//!
//! **Responsibility:** the boundary between the console and the remote REST API.
//!
//! This crate provides:
//! - The `ResourceApi` trait every controller talks to
//! - A reqwest-backed `HttpClient` implementing it for every resource
//! - An `InMemoryApi` for tests and local development
//! - One normalizing adapter for list responses (bare arrays and envelopes)
//!
//! The API remains the authority; nothing here caches or persists records.

pub mod api;
pub mod config;
pub mod envelope;
pub mod http;
pub mod in_memory;
pub mod payload;
pub mod query;
pub mod response;

pub use api::{BulkDeleteAck, DeleteAck, ResourceApi};
pub use config::{ClientConfig, ConfigError};
pub use envelope::{Page, normalize_page};
pub use http::HttpClient;
pub use in_memory::{InMemoryApi, Operation};
pub use payload::{FilePart, MultipartBody, Payload};
pub use query::ListQuery;
