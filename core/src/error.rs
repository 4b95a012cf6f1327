use alloc::string::String;
use alloc::vec::Vec;
use thiserror::Error;

/// Failure to turn a token back into a content list, or a list into a token.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token bytes are not valid UTF-8: {0}")]
    Utf8(#[from] alloc::string::FromUtf8Error),
    #[error("token does not contain valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("token JSON is not an array")]
    NotAnArray,
    #[error("token array entry {index} is not a string")]
    NotAString { index: usize },
}

pub type Result<T> = core::result::Result<T, CodecError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board needs exactly {expected} content entries, got {actual}")]
    ContentLength { expected: usize, actual: usize },
    #[error("Order is not a permutation of 0..{len}")]
    NotAPermutation { len: usize },
    #[error("Cell index {0} is outside the board")]
    InvalidIndex(i64),
}

/// A rule violated by the raw URL parameters, reported before anything is decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("data size {len} exceeds the maximum of {max} characters")]
    DataTooLarge { len: usize, max: usize },
    #[error("order count must be {expected}, got {actual}")]
    OrderCount { expected: usize, actual: usize },
    #[error("order values out of range 0..={max}: {values:?}")]
    OrderOutOfRange { max: i64, values: Vec<i64> },
    #[error("marked values out of range 0..={max}: {values:?}")]
    MarkedOutOfRange { max: i64, values: Vec<i64> },
}

/// Why a board could not be restored from a [`crate::StateStore`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no board data present")]
    Missing,
    #[error("board parameters rejected: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
    #[error("board data is corrupt: {0}")]
    Corrupt(#[from] CodecError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn join_messages(errors: &[ValidationError]) -> String {
    use alloc::string::ToString;
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
