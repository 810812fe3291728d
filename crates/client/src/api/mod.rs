//! EasyGadget REST API client.
//!
//! # Architecture
//!
//! - JSON over HTTPS with `reqwest`; the backend is the source of truth
//! - Bearer-token injection from the [`crate::session::SessionStore`] on
//!   endpoints that require auth
//! - One attempt per call: no retry, no backoff; all failures propagate to
//!   the caller as [`ApiError`]
//! - Raw wire shapes live in [`wire`] and are normalized into
//!   [`crate::types`] by [`conversions`] - once, at this boundary, never at
//!   call sites
//!
//! # Example
//!
//! ```rust,ignore
//! use easy_gadget_client::api::{ApiClient, Auth};
//!
//! let api = ApiClient::new(&config, session)?;
//! let cart: wire::WireCart = api.get("/cart", Auth::Required).await?;
//! ```

pub mod conversions;
mod http;
pub mod wire;

pub use http::{ApiClient, Auth};

use thiserror::Error;

/// Errors that can occur when interacting with the EasyGadget API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-2xx response. The message is the server's
    /// `message` field when the body carried one.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic fallback.
        message: String,
    },

    /// JSON parsing of a successful response failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The operation requires an authenticated session and none exists.
    /// Raised client-side, before any network call.
    #[error("login required")]
    AuthRequired,

    /// Persisting the session failed.
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),

    /// A file selected for upload exceeds the size limit.
    #[error("file is {size} bytes, exceeds the {max} byte limit")]
    FileTooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// Too many files selected for a multi-upload.
    #[error("{count} files selected, maximum is {max}")]
    TooManyFiles {
        /// Number of files selected.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Reading a local file for upload failed.
    #[error("upload I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration was invalid.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

impl ApiError {
    /// The HTTP status code, when the error came from a server response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is a 404 from the backend.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_displays_server_message() {
        let err = ApiError::Status {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_is_not_found() {
        let err = ApiError::Status {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ApiError::AuthRequired.is_not_found());
    }

    #[test]
    fn test_auth_required_display() {
        assert_eq!(ApiError::AuthRequired.to_string(), "login required");
    }

    #[test]
    fn test_file_too_large_display() {
        let err = ApiError::FileTooLarge {
            size: 20_000_000,
            max: 10_485_760,
        };
        assert_eq!(
            err.to_string(),
            "file is 20000000 bytes, exceeds the 10485760 byte limit"
        );
    }
}
