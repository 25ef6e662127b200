use thiserror::Error;

/// Validation failures for externally supplied puzzle states.
///
/// The search core assumes valid permutations; these errors belong to the
/// layers that accept untrusted input (HTTP handlers, CLI parsing).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("state must contain exactly 9 values, got {0}")]
    WrongLength(usize),
    #[error("state must be a permutation of the values 0 through 8")]
    NotAPermutation,
    #[error("invalid tile value: {0:?}")]
    BadToken(String),
}

/// Failure to start or run the HTTP listener.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("HTTP listener error: {0}")]
    Io(#[from] std::io::Error),
}
