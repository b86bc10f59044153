//! Uniform outcome descriptor returned by every store, remote, and sync operation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Code carried by a successful [`Status`].
pub const OK_CODE: i32 = 200;

/// Code for transport failures that never produced an HTTP status
/// (timeouts, refused connections, TLS errors).
pub const TRANSPORT_FAILURE_CODE: i32 = 599;

/// Code for a 2xx response whose body could not be decoded into posts.
pub const BAD_PAYLOAD_CODE: i32 = 502;

/// Code for storage errors that did not come from the `SQLite` engine itself.
/// Matches `SQLITE_ERROR`.
pub const GENERIC_STORAGE_CODE: i32 = 1;

/// Outcome of a single operation: `{200, "OK"}` on success, anything else is a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: i32,
    pub message: String,
}

impl Status {
    /// The neutral success value.
    pub fn ok() -> Self {
        Self {
            code: OK_CODE,
            message: "OK".to_string(),
        }
    }

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.code == OK_CODE
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

impl From<&Error> for Status {
    fn from(error: &Error) -> Self {
        let code = match error {
            Error::Database(rusqlite::Error::SqliteFailure(failure, _)) => failure.extended_code,
            Error::Database(_) | Error::Io(_) => GENERIC_STORAGE_CODE,
            Error::Http(http) => {
                if http.is_decode() {
                    BAD_PAYLOAD_CODE
                } else {
                    http.status()
                        .map_or(TRANSPORT_FAILURE_CODE, |status| i32::from(status.as_u16()))
                }
            }
            Error::Serialization(_) => BAD_PAYLOAD_CODE,
            Error::InvalidInput(_) | Error::Config(_) => 400,
        };
        Self::new(code, error.to_string())
    }
}

impl From<Error> for Status {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}
