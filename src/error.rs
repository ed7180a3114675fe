use thiserror::Error;

/// Failure to parse bracket notation.
///
/// The offending endpoint token is carried as text so the error type stays
/// independent of the domain type's own error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRangeError {
    #[error("expected a range delimited by '[' or '(' and ']' or ')'")]
    Brackets,
    #[error("expected a single ',' between the two endpoints")]
    Separator,
    #[error("invalid endpoint value `{0}`")]
    Value(String),
}

/// Rejected insertion into a [`RangeDict`](crate::RangeDict).
///
/// Entries must be keyed by non-empty, mutually disjoint ranges; a violating
/// insert fails eagerly and leaves the dict unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("range key is empty")]
    EmptyRange,
    #[error("range key overlaps an existing entry")]
    Overlap,
}

/// No entry's range contains the looked-up key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no range contains the key")]
pub struct KeyNotFoundError;
