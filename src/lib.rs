pub mod capture;
pub mod error;
pub mod fenwick;

pub use capture::{StreamCapture, StreamStats};
pub use error::Error;
pub use fenwick::FenwickTree;

/// Python bindings
use pyo3::prelude::*;

pub mod bindings;
use bindings::{Capture, Stats};

#[pymodule]
fn streamrank(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<Capture>()?;
    m.add_class::<Stats>()?;
    Ok(())
}
