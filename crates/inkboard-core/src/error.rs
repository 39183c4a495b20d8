//! Error types for the editing engine.

use crate::shapes::EntityId;
use thiserror::Error;

/// Editor errors.
///
/// Only entity-model mutations and configuration loading produce these.
/// The event layer on [`Canvas`](crate::Canvas) logs and swallows them.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),
    #[error("Entity is not a shape: {0}")]
    NotAShape(EntityId),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
