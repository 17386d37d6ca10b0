use thiserror::Error;

/// Error type for the slice front-end, metrics and configuration loading.
///
/// The accumulators themselves are total functions and never fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("invalid lane width {0}: expected one of 2, 4, 8, 16")]
    InvalidLaneWidth(usize),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Checks that a paired input has the same length as the primary one.
pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch { expected, actual });
    }
    Ok(())
}
