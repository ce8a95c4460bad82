use std::sync::{Arc, RwLock, RwLockReadGuard};

use pyo3::prelude::*;

use crate::capture::StreamCapture;
use crate::error::Error;

/// Maps a Python integer into the capture domain, folding negative values
/// into the same out-of-range error as oversized ones. Non-integers never
/// reach this point: pyo3 argument extraction raises `TypeError` for them.
fn check_domain(value: i64, bound: usize) -> Result<usize, Error> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v <= bound)
        .ok_or(Error::OutOfRange { value, max: bound })
}

/// Accepts a stream of bounded integers and builds statistics views over the
/// inputs accumulated so far.
#[pyclass]
pub struct Capture {
    inner: Arc<RwLock<StreamCapture>>,
}

#[pymethods]
impl Capture {
    #[new]
    #[pyo3(signature = (bound = 999))]
    pub fn new_py(bound: usize) -> Self {
        Capture {
            inner: Arc::new(RwLock::new(StreamCapture::new(bound))),
        }
    }

    /// Ingest one value. Raises `ValueError` if it lies outside `[0, bound]`.
    pub fn add(&self, value: i64) -> PyResult<()> {
        let mut capture = self.inner.write().expect("capture lock poisoned");
        let value = check_domain(value, capture.bound())?;
        capture.add(value)?;
        Ok(())
    }

    /// Build a statistics view over the current contents.
    ///
    /// The view shares the live structure: values added after this call are
    /// visible through previously built views.
    pub fn build_stats(&self) -> Stats {
        Stats {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn total(&self) -> u64 {
        self.read().total()
    }

    pub fn bound(&self) -> usize {
        self.read().bound()
    }

    pub fn __len__(&self) -> usize {
        self.read().total() as usize
    }
}

impl Capture {
    fn read(&self) -> RwLockReadGuard<'_, StreamCapture> {
        self.inner.read().expect("capture lock poisoned")
    }
}

/// Order-statistics queries over the values a [`Capture`] has ingested.
///
/// All methods are pure reads; each takes the shared read lock for the
/// duration of one query, so a reader never observes a half-applied update.
#[pyclass]
pub struct Stats {
    inner: Arc<RwLock<StreamCapture>>,
}

#[pymethods]
impl Stats {
    /// Count of ingested values strictly less than `value`.
    pub fn less(&self, value: i64) -> PyResult<u64> {
        let capture = self.read();
        let value = check_domain(value, capture.bound())?;
        Ok(capture.stats().less(value)?)
    }

    /// Count of ingested values strictly greater than `value`.
    pub fn greater(&self, value: i64) -> PyResult<u64> {
        let capture = self.read();
        let value = check_domain(value, capture.bound())?;
        Ok(capture.stats().greater(value)?)
    }

    /// Count of ingested values in `[lower, upper]`, both ends inclusive.
    pub fn between(&self, lower: i64, upper: i64) -> PyResult<u64> {
        let capture = self.read();
        let lower = check_domain(lower, capture.bound())?;
        let upper = check_domain(upper, capture.bound())?;
        Ok(capture.stats().between(lower, upper)?)
    }

    /// Count of ingested values exactly equal to `value`.
    pub fn count(&self, value: i64) -> PyResult<u64> {
        let capture = self.read();
        let value = check_domain(value, capture.bound())?;
        Ok(capture.stats().count(value)?)
    }

    pub fn total(&self) -> u64 {
        self.read().total()
    }

    /// `less` over a batch of values, evaluated in parallel.
    pub fn batch_less(&self, values: Vec<i64>) -> PyResult<Vec<u64>> {
        let capture = self.read();
        let values = values
            .into_iter()
            .map(|value| check_domain(value, capture.bound()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(capture.stats().batch_less(&values)?)
    }
}

impl Stats {
    fn read(&self) -> RwLockReadGuard<'_, StreamCapture> {
        self.inner.read().expect("capture lock poisoned")
    }
}
