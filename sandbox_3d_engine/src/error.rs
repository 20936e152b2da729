//! Error types for the Sandbox3D engine
//!
//! This module defines the error types used throughout the engine,
//! including scene graph mutation, resource loading and preview rendering.

use std::fmt;

/// Result type for Sandbox3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Sandbox3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (graphics device, render target, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, mesh, cubemap, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, renderer, subsystems)
    InitializationFailed(String),

    /// Node key does not belong to the tree it was used with
    InvalidNode(String),

    /// Structural operation that would break the tree invariants
    InvalidOperation(String),

    /// Resource data could not be turned into a GPU object
    ResourceLoadFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidNode(msg) => write!(f, "Invalid node: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::ResourceLoadFailed(msg) => write!(f, "Resource load failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an error and build an `Error` value from it
///
/// The first argument selects the variant: pass a bare source tag to get a
/// `BackendError`, or `Variant => source` to pick another string variant.
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("sandbox3d::Scene", "Node {:?} not found", key);
/// let err = engine_err!(InvalidNode => "sandbox3d::NodeTree", "Node {:?} not found", key);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident => $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sandbox3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::sandbox3d::Error::BackendError(message)
    }};
}

/// Log an error and return it from the current function
///
/// Same argument forms as [`engine_err!`].
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
