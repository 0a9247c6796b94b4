use std::fmt;
use std::io;

/// Crate errors
#[derive(Debug)]
pub enum Error {
    /// Failed to spawn the local `ssh` or `bitcoin-cli` process
    Exec(io::Error),
    /// The remote command exited unsuccessfully
    Remote {
        /// Exit status, `None` if terminated by a signal
        code: Option<i32>,
        /// Captured stderr, trimmed
        stderr: String,
    },
    /// Response could not be parsed as the expected json
    Json(serde_json::Error),
    /// Not a valid transaction id
    InvalidTxid(String),
    /// Not a valid hex-encoded script
    InvalidScript(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Exec(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exec(e) => write!(f, "failed to execute command: {e}"),
            Self::Remote { code, stderr } => match code {
                Some(code) => write!(f, "remote command failed ({code}): {stderr}"),
                None => write!(f, "remote command terminated: {stderr}"),
            },
            Self::Json(e) => write!(f, "unexpected response: {e}"),
            Self::InvalidTxid(s) => write!(f, "invalid txid: {s}"),
            Self::InvalidScript(s) => write!(f, "invalid script hex: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Exec(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Crate `Result` type
pub type Result<T, E = Error> = core::result::Result<T, E>;
