//! Common error type used throughout guideart.
//!
//! Every image source (local file, remote URL, backend service) reports its
//! failures through [`Error`]. Callers classify failures with
//! [`Error::is_not_found`] and [`Error::is_cancelled`] instead of inspecting
//! messages or status codes themselves.

/// Common error type for guideart.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An HTTP request failed or returned a non-success status.
    ///
    /// `status` is `None` when the request never produced a response
    /// (connection refused, timeout, malformed URL).
    #[error("HTTP error fetching {url}: {message}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// Response status code, if a response was received.
        status: Option<u16>,
        /// Human readable description of the failure.
        message: String,
    },

    /// A response was received but its content is not usable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A backend service failed to produce an image.
    #[error("Service '{service}' failed: {message}")]
    Service {
        /// Name of the backend service.
        service: String,
        /// Human readable description of the failure.
        message: String,
    },

    /// The operation was cancelled before it completed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Persisting an image failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a new Http error.
    pub fn http<U: Into<String>, M: Into<String>>(url: U, status: Option<u16>, message: M) -> Self {
        Self::Http {
            url: url.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a new InvalidResponse error.
    pub fn invalid_response<S: Into<String>>(msg: S) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a new Service error.
    pub fn service<N: Into<String>, M: Into<String>>(service: N, message: M) -> Self {
        Self::Service {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a new Storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` only for an HTTP response with status 404.
    ///
    /// A missing file on disk is an [`Error::Io`] and does not count.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the operation was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
