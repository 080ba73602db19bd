use ndhistogram::axis::{Axis, BinInterval};

use crate::error::{Error, Result};
use super::OpenTime;

/// An axis with equal-sized bins covering `[low, high]`, closed at both ends.
///
/// Bins are half-open `[lo, hi)`, except the last which also includes `high`.
/// There are no underflow or overflow bins, so this axis has exactly `N` bins;
/// coordinates outside `[low, high]` (and NaN) have no index.
///
/// When `low == high` every edge coincides and all in-range coordinates go
/// to bin 0.
///
/// # Examples
/// ```
/// use ndhistogram::{ndhistogram, Histogram};
/// use tomosino::sinogram::axis::LeafTimeAxis;
/// let mut hist = ndhistogram!(LeafTimeAxis::new(4, 0.0, 1.0).unwrap(); usize);
/// hist.fill(&1.0);
/// assert_eq!(hist.value(&1.0), Some(&1));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LeafTimeAxis {
    nbins: usize,
    low: OpenTime,
    high: OpenTime,
    step: OpenTime,
}

impl LeafTimeAxis {

    /// Fails with `Error::DegenerateInput` if `nbins == 0`.
    pub fn new(nbins: usize, low: OpenTime, high: OpenTime) -> Result<Self> {
        if nbins == 0 { return Err(Error::degenerate("need more than zero bins on axis")) }
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let step = (high - low) / nbins as OpenTime;
        Ok(Self { nbins, low, high, step })
    }

    pub fn low (&self) -> OpenTime { self.low  }
    pub fn high(&self) -> OpenTime { self.high }
    pub fn step(&self) -> OpenTime { self.step }

    /// Lower edge of bin `i`; `high` for `i >= nbins`.
    ///
    /// Edges are `low + i * step` rather than a running sum, so they do not
    /// drift, and the last one is exactly `high`.
    pub fn edge(&self, i: usize) -> OpenTime {
        if i >= self.nbins { self.high }
        else               { self.low + i as OpenTime * self.step }
    }
}

impl Axis for LeafTimeAxis {
    type Coordinate = OpenTime;
    type BinInterval = BinInterval<OpenTime>;

    #[inline]
    fn index(&self, coordinate: &Self::Coordinate) -> Option<usize> {
        let t = *coordinate;
        if !(self.low..=self.high).contains(&t) { return None }
        if self.step == 0.0 { return Some(0) }

        // First guess from scaled distance, then nudge by at most one bin so
        // that the answer agrees with the edges reported by `bin`.
        let n = self.nbins;
        let scale = n as OpenTime / (self.high - self.low);
        let mut i = (((t - self.low) * scale) as usize).min(n - 1);
        if t < self.edge(i) {
            i = i.saturating_sub(1);
        } else if i + 1 < n && t >= self.edge(i + 1) {
            i += 1;
        }
        Some(i)
    }

    fn num_bins(&self) -> usize { self.nbins }

    fn bin(&self, index: usize) -> Option<<Self as Axis>::BinInterval> {
        (index < self.nbins).then(|| BinInterval::new(self.edge(index), self.edge(index + 1)))
    }
}
