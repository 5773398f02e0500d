//! Unified error type for the server, the business logic, and the dashboard client.

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database layer failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure (upload store, config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport failure while talking to the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Unexpected response status: {status}")]
    UnexpectedStatus {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// Input failed domain validation
    #[error("Validation error: {message}")]
    Validation {
        /// What was invalid
        message: String,
    },

    /// A member filter value could not be parsed
    #[error("Invalid filter value for {key}: {value}")]
    InvalidFilter {
        /// Query key of the filter
        key: String,
        /// Raw value that was rejected
        value: String,
    },

    /// Uploaded file is not an image
    #[error("Unsupported upload content type: {content_type}")]
    UnsupportedUpload {
        /// Content type sent by the client
        content_type: String,
    },

    /// No member with this identifier
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// No gallery image with this identifier
    #[error("Gallery image not found: {id}")]
    GalleryImageNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// Malformed multipart body
    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the failure was caused by the caller's input rather than by the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidFilter { .. }
                | Self::UnsupportedUpload { .. }
                | Self::Multipart(_)
                | Self::Json(_)
        )
    }

    /// Whether the failure is a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound { .. } | Self::GalleryImageNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
