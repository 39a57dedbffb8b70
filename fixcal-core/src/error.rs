//! Error types for fixcal.
//!
//! Every variant owns plain data so the error is `Clone`: a failed computation
//! is cached and handed out to each caller that waited on it.

use thiserror::Error;

/// Result type alias using `FixtureError`.
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Main error type for fetching and building fixture calendars.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream answered with a non-success status.
    #[error("getting {url}: {status}")]
    UpstreamStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Upstream did not answer in time.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // PARSE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The page has no fixtures table.
    #[error("could not find table")]
    TableNotFound,

    /// The fixtures table has no rows.
    #[error("could not find any fixtures")]
    NoFixtures,

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Team id is empty or contains characters that cannot go into a URL.
    #[error("Invalid team id: {0:?}")]
    InvalidTeamId(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FixtureError {
    /// Returns true if a later attempt could succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FixtureError::HttpError(_) | FixtureError::ConnectionTimeout(_) => true,
            FixtureError::UpstreamStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the upstream site is the cause.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            FixtureError::HttpError(_)
                | FixtureError::UpstreamStatus { .. }
                | FixtureError::ConnectionTimeout(_)
                | FixtureError::TableNotFound
                | FixtureError::NoFixtures
        )
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, FixtureError::InvalidTeamId(_))
    }
}
