//! Error taxonomy
//!
//! Every failure the pipeline can meet falls into one of the `AppError` variants.
//! Which variants abort what is decided by the callers, not here:
//!
//! - row / panel / section failures degrade to empty values
//! - `Setup` aborts one (case type × role) pass
//! - nothing aborts the whole run

use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Element missing or not ready in time
    #[error("UI not ready: {0}")]
    TransientUi(#[from] SessionError),

    /// Nothing to bridge into the HTTP client
    #[error("session authentication unavailable: {reason}")]
    SessionAuth { reason: String },

    /// Download failed (non-2xx or network)
    #[error("transport failure for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Blob store rejected an operation
    #[error("storage failure for blob {blob}: {source}")]
    Storage {
        blob: String,
        #[source]
        source: BoxError,
    },

    /// Text did not match the expected shape
    #[error("could not parse {field} from {value:?}")]
    ParseMismatch { field: &'static str, value: String },

    /// A required form control never appeared
    #[error("search setup failed at {control}: {source}")]
    Setup {
        control: String,
        #[source]
        source: BoxError,
    },

    /// OCR collaborator failed
    #[error("OCR failed: {source}")]
    Ocr {
        #[source]
        source: BoxError,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Navigable-session failures
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no element matches {selector:?}")]
    NotFound { selector: String },

    #[error("timed out after {timeout:?} waiting for {condition}")]
    Timeout { condition: String, timeout: Duration },

    /// Handle was captured before a navigation
    #[error("stale element reference")]
    Stale,

    #[error("driver error: {source}")]
    Driver {
        #[source]
        source: BoxError,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {var_name}={value:?} is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: &'static str,
    },

    #[error("failed to read config file {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid URL {value:?} for {field}")]
    InvalidUrl { field: &'static str, value: String },
}

// ========== conversions from driver errors ==========

impl From<chromiumoxide::error::CdpError> for SessionError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        let message = err.to_string();
        // CDP reports detached nodes this way after a navigation
        if message.contains("Could not find node") || message.contains("No node with given id")
        {
            SessionError::Stale
        } else {
            SessionError::Driver {
                source: Box::new(err),
            }
        }
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::TransientUi(err.into())
    }
}

// ========== convenience constructors ==========

impl AppError {
    pub fn transport(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport {
            url: url.into(),
            source: Box::new(source),
        }
    }

    pub fn storage(
        blob: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage {
            blob: blob.into(),
            source: Box::new(source),
        }
    }

    pub fn setup(control: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Setup {
            control: control.into(),
            source: source.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

impl SessionError {
    pub fn driver(source: impl Into<BoxError>) -> Self {
        SessionError::Driver {
            source: source.into(),
        }
    }
}

// ========== Result aliases ==========

pub type AppResult<T> = Result<T, AppError>;

pub type SessionResult<T> = Result<T, SessionError>;
