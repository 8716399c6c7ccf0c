//! # chanmark-core
//!
//! Channel bookmark record model.
//!
//! This crate defines what a valid bookmark looks like and how it moves
//! through its lifecycle (create, patch, soft-delete, lineage fork), how it
//! is composed with file metadata for read responses, and the list etag used
//! by clients to detect stale channel lists. Persistence, transport and
//! authorization live elsewhere.

pub mod audit;
pub mod config;
pub mod defaults;
pub mod error;
pub mod etag;
pub mod ids;
pub mod logging;
pub mod models;
pub mod text;
pub mod validation;

// Re-export commonly used types at crate root
pub use audit::Auditable;
pub use config::BookmarkPolicy;
pub use error::{BookmarkField, Error, Result, ValidationError};
pub use etag::{etag, list_etag, Freshness};
pub use ids::{is_valid_id, new_id, now_millis};
pub use models::*;
pub use validation::BOOKMARK_ENTITY;
