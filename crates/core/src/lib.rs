//! Domain building blocks shared by every admin screen.
//!
//! This crate contains **pure** primitives (no HTTP, no async runtime):
//! identifiers, the `Resource` contract, status enums and their badges,
//! form field schemas and the error taxonomy used across the API boundary.

pub mod error;
pub mod id;
pub mod resource;
pub mod schema;
pub mod status;

pub use error::{ApiError, ApiResult, DomainError, DomainResult, ErrorKind, FieldErrors};
pub use id::ResourceId;
pub use resource::{Resource, ResourceKind};
pub use schema::{Editable, FieldKind, FieldSpec};
pub use status::{Badge, StatusKind, Tone};
