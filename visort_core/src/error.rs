use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::result::Result as StdResult;

use crate::source::{MAX_SIZE, MIN_SIZE};

/// Alias for `Result<T, visort_core::Error>`.
pub type Result<T> = StdResult<T, Error>;

/// Everything the controller can refuse to do.
#[derive(Debug)]
pub enum Error {
    /// A run is still in flight (running, or stopping but not yet finished).
    Busy,

    /// There is nothing to sort.
    EmptyArray,

    /// Requested array size is outside the supported range.
    InvalidSize(usize),

    /// Raised when an algorithm name matches none of the five sorts.
    UnknownAlgorithm(String),

    /// Raised when a speed preset name is not recognised.
    UnknownSpeed(String),

    /// Raised when an array pattern name is not recognised.
    UnknownPattern(String),

    /// The worker thread could not be spawned.
    Spawn(IoError),
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Spawn(ref error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Busy => f.write_str("A sort is already in progress"),
            Error::EmptyArray => f.write_str("The array is empty"),
            Error::InvalidSize(size) => write!(
                f,
                "Invalid array size: {size} (expected {MIN_SIZE}..={MAX_SIZE})"
            ),
            Error::UnknownAlgorithm(ref name) => write!(f, "Unknown algorithm: `{name}`"),
            Error::UnknownSpeed(ref name) => write!(f, "Unknown speed: `{name}`"),
            Error::UnknownPattern(ref name) => write!(f, "Unknown pattern: `{name}`"),
            Error::Spawn(ref error) => write!(f, "Unable to start the sort worker: {error}"),
        }
    }
}
