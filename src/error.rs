//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`ApiError`], [`StatsError`], [`ConfigError`]), while the CLI and
//! `main` use `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use playlist_lens::error::{Error, Result, ResultExt};
//!
//! fn averages(features: &[AudioFeatures]) -> Result<SummaryStatistics> {
//!     stats::summarize(features).with_context("playlist averages")
//! }
//! ```

use crate::config::ConfigError;
use crate::spotify::ApiError;
use crate::stats::StatsError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Web API failure (network, not found, malformed response, ...)
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Not enough data to aggregate
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No access token in flags, environment or config
    #[error("No access token configured")]
    MissingToken,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping context layers
    pub fn root(&self) -> &Error {
        match self {
            Self::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, ApiError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Api(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, StatsError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Stats(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(ApiError::NotFound("playlists/abc".to_string()));
        assert!(err.to_string().contains("playlists/abc"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(StatsError::InsufficientData).context("while averaging top tracks");
        let msg = err.to_string();
        assert!(msg.contains("while averaging top tracks"));
    }

    #[test]
    fn test_root_skips_context() {
        let err = Error::from(ApiError::RateLimited)
            .context("inner")
            .context("outer");
        assert!(matches!(err.root(), Error::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), ApiError> = Err(ApiError::Unauthorized);
        let with_ctx = result.with_context("loading playlist");
        assert!(with_ctx.unwrap_err().to_string().contains("loading playlist"));
    }
}
