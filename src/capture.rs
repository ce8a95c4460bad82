use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::fenwick::FenwickTree;

/// Accumulates a stream of integers from the fixed domain `[0, bound]` and
/// hands out [`StreamStats`] views for order-statistics queries over
/// everything ingested so far.
///
/// One Fenwick tree plus a running total is enough to answer `less`,
/// `greater`, and `between`; the ingested multiset itself is never
/// materialized. Values only accumulate; there is no removal.
///
/// # Example
///
/// ```rust
/// use streamrank::StreamCapture;
///
/// let mut capture = StreamCapture::new(999);
/// for value in [5, 3, 9, 3, 4, 4, 6, 6, 6] {
///     capture.add(value).unwrap();
/// }
/// let stats = capture.stats();
/// assert_eq!(stats.less(4).unwrap(), 2);
/// assert_eq!(stats.between(3, 6).unwrap(), 8);
/// assert_eq!(stats.greater(4).unwrap(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct StreamCapture {
    bound: usize,
    tree: FenwickTree,
    total: u64,
}

impl StreamCapture {
    /// Creates an empty capture accepting values in `[0, bound]`.
    ///
    /// The bound is fixed for the lifetime of the capture. Value `v` is kept
    /// at tree index `v + 1`, so the tree spans `[1, bound + 1]` and value 0
    /// is an ordinary member of the domain.
    pub fn new(bound: usize) -> Self {
        StreamCapture {
            bound,
            tree: FenwickTree::new(bound + 1),
            total: 0,
        }
    }

    /// The largest ingestable value.
    #[inline]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Number of values ingested so far (duplicates included).
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns `true` iff nothing has been ingested yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Ingests one value, failing with [`Error::OutOfRange`] if it lies
    /// outside `[0, bound]`. `O(log bound)`.
    pub fn add(&mut self, value: usize) -> Result<()> {
        self.check_value(value)?;
        self.tree.update(value + 1, 1)?;
        self.total += 1;
        Ok(())
    }

    /// Builds a read-only statistics view over the current contents.
    ///
    /// The view borrows the capture, so further ingestion requires dropping
    /// it first; rebuild it afterwards to observe the new values. The shared
    /// live-view behavior sits in the Python layer, which re-reads the
    /// capture under a lock on every query.
    pub fn stats(&self) -> StreamStats<'_> {
        StreamStats { capture: self }
    }

    /// The one domain check every public entry point funnels through.
    fn check_value(&self, value: usize) -> Result<()> {
        if value > self.bound {
            return Err(Error::OutOfRange {
                value: value as i64,
                max: self.bound,
            });
        }
        Ok(())
    }

    /// Count of ingested values `<= value`, in tree-index terms.
    /// Callers have already validated `value <= bound`.
    fn rank(&self, value: usize) -> Result<u64> {
        self.tree.query(value + 1)
    }
}

/// Read-only order-statistics view over a [`StreamCapture`].
///
/// Every query validates its arguments against the capture's domain before
/// touching the tree, and none of them mutates anything.
#[derive(Clone, Copy, Debug)]
pub struct StreamStats<'a> {
    capture: &'a StreamCapture,
}

impl StreamStats<'_> {
    /// Count of ingested values strictly less than `value`.
    ///
    /// `less(0)` is always 0: the tree's `query(0)` never walks.
    pub fn less(&self, value: usize) -> Result<u64> {
        self.capture.check_value(value)?;
        // Values 0..=value-1 occupy tree indices 1..=value.
        self.capture.tree.query(value)
    }

    /// Count of ingested values strictly greater than `value`.
    pub fn greater(&self, value: usize) -> Result<u64> {
        self.capture.check_value(value)?;
        Ok(self.capture.total - self.capture.rank(value)?)
    }

    /// Count of ingested values in `[lower, upper]`, inclusive on both ends.
    ///
    /// Fails with [`Error::OutOfRange`] if either bound leaves the domain,
    /// and with [`Error::InvalidOrder`] if `upper < lower`.
    pub fn between(&self, lower: usize, upper: usize) -> Result<u64> {
        self.capture.check_value(lower)?;
        self.capture.check_value(upper)?;
        if upper < lower {
            return Err(Error::InvalidOrder { lower, upper });
        }
        Ok(self.capture.rank(upper)? - self.capture.tree.query(lower)?)
    }

    /// Count of ingested values exactly equal to `value`.
    pub fn count(&self, value: usize) -> Result<u64> {
        self.capture.check_value(value)?;
        Ok(self.capture.rank(value)? - self.capture.tree.query(value)?)
    }

    /// Number of values ingested into the underlying capture.
    #[inline]
    pub fn total(&self) -> u64 {
        self.capture.total()
    }

    /// `less` over a batch of values, evaluated in parallel.
    ///
    /// Queries are pure reads, so fanning them out is safe; results keep the
    /// input order. Fails on the first out-of-domain value.
    pub fn batch_less(&self, values: &[usize]) -> Result<Vec<u64>> {
        values.par_iter().map(|&value| self.less(value)).collect()
    }
}
