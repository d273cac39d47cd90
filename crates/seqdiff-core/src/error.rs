//! Precondition errors shared by every seqdiff entry point.

use thiserror::Error;

/// Result type alias for seqdiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Programmer errors raised when a public entry point is handed input that
/// violates its contract. None of these are recoverable by retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An index or bound falls outside what the collection or range allows.
    #[error("{name} is out of range: {value} (must be at most {limit})")]
    OutOfRange {
        name: &'static str,
        value: usize,
        limit: usize,
    },

    /// `DiffOptions::context_size` must be 1 or more.
    #[error("context size must be at least 1, got {0}")]
    InvalidContextSize(usize),

    /// Modification thresholds are similarity values and live in `[0, 1]`.
    #[error("modification threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    /// A section whose lengths contradict its match flag.
    #[error("invalid section: {0}")]
    InvalidSection(String),

    /// A diff element whose present/absent sides contradict its operation.
    #[error("invalid diff element: {0}")]
    InvalidElement(String),

    /// Substring results must describe at least one element.
    #[error("length must be greater than zero")]
    ZeroLength,

    /// Reading the value of an absent `Optional`.
    #[error("this Optional does not have a value")]
    NoValue,
}

impl Error {
    pub(crate) fn out_of_range(name: &'static str, value: usize, limit: usize) -> Self {
        Error::OutOfRange { name, value, limit }
    }
}

/// Checks `lower <= upper <= len`, naming the offending bound on failure.
pub fn check_bounds(
    lower_name: &'static str,
    lower: usize,
    upper_name: &'static str,
    upper: usize,
    len: usize,
) -> Result<()> {
    if upper > len {
        return Err(Error::out_of_range(upper_name, upper, len));
    }
    if lower > upper {
        return Err(Error::out_of_range(lower_name, lower, upper));
    }
    Ok(())
}
