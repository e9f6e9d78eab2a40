//! Error types for feeder-view
//!
//! Centralized error handling using snafu. Every failure is local to the
//! resource it concerns; nothing here is fatal to a session.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Transport-level failure talking to the data source
    #[snafu(display("Request to {path} failed: {source}"))]
    Http { path: String, source: reqwest::Error },

    /// The data source answered with a non-success status
    #[snafu(display("Request to {path} returned status {status}"))]
    Status { path: String, status: u16 },

    /// The response body did not match the expected shape
    #[snafu(display("Unexpected payload from {path}: {source}"))]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    /// Scripted or synthetic fetch failure (used by non-HTTP sources)
    #[snafu(display("Fetch failed for {path}: {message}"))]
    Fetch { path: String, message: String },

    /// A fetch for the mode is already outstanding elsewhere
    #[snafu(display("A fetch for {mode} is already in flight"))]
    Pending { mode: String },

    /// IO error (config files, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    /// True when the failure came from the remote side rather than local IO/config
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Http { .. } | Error::Status { .. } | Error::Decode { .. } | Error::Fetch { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
