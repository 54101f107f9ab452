//! Error types for the back-office dashboard core.

/// All errors that can occur when loading fixture data.
///
/// Every variant is a flavour of the same user-visible failure: a
/// fixture collection could not be fetched. Errors are absorbed at the
/// data-fetch boundary (see [`crate::backoffice`]) and surfaced to the
/// affected view as a message; they are never propagated further up.
#[derive(Debug, thiserror::Error)]
pub enum BackofficeError {
    /// HTTP transport failed (connection refused, timeout, ...).
    #[cfg(any(feature = "async", feature = "blocking"))]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The fixture endpoint answered with a non-success status.
    #[error("fetch failed with status {status}: {message}")]
    Fetch {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, or a placeholder if it could not be read.
        message: String,
    },

    /// The fixture body could not be decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BackofficeError>;
