use pyo3::exceptions::PyValueError;
use pyo3::PyErr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised by captures, stats views, and the raw tree.
///
/// These are caller errors, not transient faults: nothing retries, and the
/// offending call mutates no state (range checks precede every walk).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value or index falls outside the valid domain. The displayed range
    /// keeps 0 as its lower bound even for the raw tree, where index 0 is
    /// never a legal update target.
    #[error("number {value} outside range [0 - {max}]")]
    OutOfRange { value: i64, max: usize },

    /// `between` called with its bounds reversed.
    #[error("invalid range: upper bound {upper} is below lower bound {lower}")]
    InvalidOrder { lower: usize, upper: usize },
}

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
