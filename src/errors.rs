//! Error Types
//!
//! This module defines the error types used throughout the resource core.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, ResourceError>`. The variants follow the failure
//! taxonomy of the resource system: loader registry, lifecycle, device
//! limits, and IO/decode/parse errors.

use thiserror::Error;

use crate::resources::ResourceKind;

/// The main error type for the resource core.
#[derive(Error, Debug)]
pub enum ResourceError {
    // ========================================================================
    // Loader Registry Errors
    // ========================================================================
    /// No loader has been registered for the requested `(kind, tag)` pair.
    ///
    /// This is always fatal to the fetch; the cache never hands out an
    /// unloadable resource.
    #[error("no loader registered for {kind} resources tagged \"{tag}\"")]
    NoLoaderRegistered {
        /// Resource class the fetch asked for.
        kind: ResourceKind,
        /// Dispatch tag of the requested resource.
        tag: String,
    },

    // ========================================================================
    // Lifecycle Errors
    // ========================================================================
    /// The resource was closed while (or before) the fetch observed it.
    #[error("resource closed: {0}")]
    Closed(String),

    /// A loader ran and reported failure.
    #[error("failed to load {0}: {1}")]
    LoadFailed(String, String),

    // ========================================================================
    // Device Limit Errors
    // ========================================================================
    /// A loaded resource exceeds the maximum texture dimension reported by
    /// the graphics context. Only raised under [`OversizePolicy::Fail`].
    ///
    /// [`OversizePolicy::Fail`]: crate::config::OversizePolicy::Fail
    #[error("resource dimension {dimension} exceeds max texture size {max}")]
    Oversized {
        /// Largest pixel dimension of the offending resource.
        dimension: u32,
        /// The cached device limit.
        max: u32,
    },

    // ========================================================================
    // IO, Decode & Parse Errors
    // ========================================================================
    /// The resolved asset path does not exist on disk.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// File IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally valid input that fails semantic validation.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<image::ImageError> for ResourceError {
    fn from(err: image::ImageError) -> Self {
        ResourceError::ImageDecode(err.to_string())
    }
}

/// Alias for `Result<T, ResourceError>`.
pub type Result<T> = std::result::Result<T, ResourceError>;
