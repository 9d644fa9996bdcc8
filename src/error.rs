//! Crate-wide error handling.
//!
//! Errors are `anyhow::Error` values carrying human-readable context. At public boundaries an
//! `ErrorType` is attached with `IntoResult::pub_result` so that callers can tell which kind of
//! user action failed.

use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Credentials were missing or rejected.
    Auth,
    /// The key-value store could not be read.
    Load,
    /// The key-value store could not be written.
    Save,
    /// The CSV document could not be produced or written.
    Export,
    /// The tracker home or its `config.json` is missing or invalid.
    Config,
    /// The local session file could not be read or written.
    Session,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Attaches an `ErrorType` to the error of a `Result` before it leaves the library.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type))
    }
}

/// Returns the `ErrorType` attached by `pub_result`, if any.
pub fn error_type(e: &Error) -> Option<ErrorType> {
    e.downcast_ref::<ErrorType>().copied()
}
