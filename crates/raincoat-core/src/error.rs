//! Shared error type across raincoat crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config or request.
    BadRequest,
    /// Order store could not be opened, read, or written.
    Store,
    /// Remote transfer failed.
    Transfer,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Store => "STORE",
            ClientCode::Transfer => "TRANSFER",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RaincoatError>;

/// Unified error type used by core and dashboard.
#[derive(Debug, Error)]
pub enum RaincoatError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("store: {0}")]
    Store(String),
    #[error("transfer: {0}")]
    Transfer(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RaincoatError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RaincoatError::BadRequest(_) => ClientCode::BadRequest,
            RaincoatError::Store(_) => ClientCode::Store,
            RaincoatError::Transfer(_) => ClientCode::Transfer,
            RaincoatError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            RaincoatError::Internal(_) => ClientCode::Internal,
        }
    }
}
