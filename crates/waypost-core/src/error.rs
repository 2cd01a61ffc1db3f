//! Error types for waypost-core

use thiserror::Error;
use waypost_router::RouteError;

/// Result type alias for waypost-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for embedding the router
#[derive(Debug, Error)]
pub enum Error {
    /// Route registration failed
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Host header is not visible ASCII
    #[error("Invalid host header: {0}")]
    InvalidHost(String),

    /// Request target has no origin-form path (e.g. `OPTIONS *`)
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
