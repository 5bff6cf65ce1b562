//! Core error type.
//!
//! `tl-light` wraps `TlError` as one variant of its own error enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TlError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tl-core`.
pub type TlResult<T> = Result<T, TlError>;
