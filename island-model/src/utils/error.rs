#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

use std::hash::{Hash, Hasher};

/// Classifies errors raised by the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A fatal misconfiguration: e.g. an algorithm replaced the problem of a population or
    /// a topology disagrees with archipelago membership.
    Configuration,
    /// An index is outside of the valid range.
    OutOfRange,
    /// Dimensions or vertex counts do not match.
    SizeMismatch,
    /// An optional capability is not supported by the implementation.
    NotImplemented,
    /// An error raised by a collaborator during evolution.
    Runtime,
}

/// A basic error type which, essentially, a wrapper on String type with an error kind.
#[derive(Clone, Debug)]
pub struct GenericError {
    kind: ErrorKind,
    message: String,
}

/// A type alias for result type with `GenericError`.
pub type GenericResult<T> = Result<T, GenericError>;

impl GenericError {
    /// Creates a new instance of `GenericError`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates an error for index outside of `[0, size)` range.
    pub fn out_of_range(what: &str, index: usize, size: usize) -> Self {
        Self::new(ErrorKind::OutOfRange, format!("{what} index {index} is out of range [0, {size})"))
    }

    /// Creates a size mismatch error.
    pub fn size_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::SizeMismatch, format!("{what}: expected size {expected}, got {actual}"))
    }

    /// Creates an error for a capability which is not implemented.
    pub fn not_implemented(capability: &str) -> Self {
        Self::new(ErrorKind::NotImplemented, format!("{capability} has not been implemented"))
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns error message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Joins many errors with separator
    pub fn join_many(errs: &[GenericError], separator: &str) -> String {
        errs.iter().map(|err| err.message.clone()).collect::<Vec<_>>().join(separator)
    }
}

impl std::fmt::Display for GenericError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenericError {}

impl From<String> for GenericError {
    fn from(msg: String) -> Self {
        Self::new(ErrorKind::Runtime, msg)
    }
}

impl<'a> From<&'a str> for GenericError {
    fn from(value: &'a str) -> Self {
        Self::new(ErrorKind::Runtime, value)
    }
}

impl From<Box<dyn std::error::Error>> for GenericError {
    fn from(value: Box<dyn std::error::Error>) -> Self {
        Self::new(ErrorKind::Runtime, value.to_string())
    }
}

impl From<std::io::Error> for GenericError {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::Runtime, value.to_string())
    }
}

impl From<serde_json::Error> for GenericError {
    fn from(value: serde_json::Error) -> Self {
        Self::new(ErrorKind::Configuration, value.to_string())
    }
}

impl PartialEq<Self> for GenericError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message.eq(&other.message)
    }
}

impl Eq for GenericError {}

impl Hash for GenericError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.message.hash(state);
    }
}
