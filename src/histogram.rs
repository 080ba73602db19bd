//! Leaf-open-time histograms.

use std::fmt;

use log::debug;
use ndhistogram::{ndhistogram, Histogram as _};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sinogram::{axis::LeafTimeAxis, OpenTime, Sinogram};
use crate::utils::min_max;

/// Default number of bins
pub const DEFAULT_BINS: usize = 10;

/// Which open-times are counted, and over which range
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// All values, closed leaves included, binned over `[min, max]`.
    /// Use this for quantitative checks.
    #[default]
    FullRange,

    /// Only open leaves (`> 0`), binned over `[0, max]`. Use this for
    /// displaying modulation.
    OpenLeaf,
}

/// One bin: `[low, high)`, or `[low, high]` for the last bin of a histogram
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub low  : OpenTime,
    pub high : OpenTime,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    policy: Policy,
    bins: Vec<Bin>,
}

impl Histogram {
    pub fn policy(&self) -> Policy { self.policy }
    pub fn bins  (&self) -> &[Bin] { &self.bins  }
    pub fn n_bins(&self) -> usize  { self.bins.len() }

    /// Number of values which were counted
    pub fn total(&self) -> usize { self.bins.iter().map(|b| b.count).sum() }

    /// `((low, high), count)` for each bin, in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ((OpenTime, OpenTime), usize)> + '_ {
        self.bins.iter().map(|&Bin { low, high, count }| ((low, high), count))
    }
}

/// Bin `values` into `nbins` equal-width bins, according to `policy`.
///
/// Fails with `Error::DegenerateInput` if `nbins` is zero, or if no values
/// are left to bin once the policy has been applied. NaNs are never counted.
/// When all the values are identical, every bin has zero width and all the
/// values end up in the first one.
pub fn build_histogram(values: impl IntoIterator<Item = OpenTime>, nbins: usize, policy: Policy) -> Result<Histogram> {
    let values: Vec<OpenTime> = match policy {
        Policy::FullRange => values.into_iter().collect(),
        Policy::OpenLeaf  => values.into_iter().filter(|&t| t > 0.0).collect(),
    };
    let (min, max) = min_max(values.iter().copied())
        .ok_or_else(|| Error::degenerate(format!("no leaf-open-times to bin ({policy:?})")))?;
    let low = match policy {
        Policy::FullRange => min,
        Policy::OpenLeaf  => 0.0,
    };

    let axis = LeafTimeAxis::new(nbins, low, max)?;
    let mut hist = ndhistogram!(axis.clone(); usize);
    for t in &values {
        hist.fill(t);
    }
    debug!("histogram: {} values in {nbins} bins over [{low}, {max}]", values.len());

    let bins = (0..nbins)
        .map(|i| Bin {
            low  : axis.edge(i),
            high : axis.edge(i + 1),
            count: hist.value_at_index(i).copied().unwrap_or(0),
        })
        .collect();
    Ok(Histogram { policy, bins })
}

impl Sinogram {
    pub fn histogram(&self, nbins: usize, policy: Policy) -> Result<Histogram> {
        build_histogram(self.open_times(), nbins, policy)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "      low       high      count")?;
        for Bin { low, high, count } in &self.bins {
            writeln!(f, "{low:9.4}  {high:9.4}  {count:9}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;
    use proptest::prelude::*;
    use float_eq::assert_float_eq;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    fn counts(h: &Histogram) -> Vec<usize> { h.bins().iter().map(|b| b.count).collect() }

    #[test]
    fn full_range_counts_zeros_and_includes_max() {
        let h = build_histogram([0.0, 0.0, 0.0, 0.5, 1.0], 2, Policy::FullRange).unwrap();
        assert_eq!(counts(&h), vec![3, 2]);
        assert_eq!(h.bins()[0], Bin { low: 0.0, high: 0.5, count: 3 });
        assert_eq!(h.bins()[1], Bin { low: 0.5, high: 1.0, count: 2 });
    }

    #[test]
    fn full_range_starts_at_minimum() {
        let h = build_histogram([0.2, 0.4, 0.6], 2, Policy::FullRange).unwrap();
        assert_float_eq!(h.bins()[0].low , 0.2, abs <= 1e-12);
        assert_float_eq!(h.bins()[1].high, 0.6, abs <= 1e-12);
        assert_eq!(counts(&h), vec![1, 2]);
    }

    #[test]
    fn open_leaf_ignores_closed_leaves() {
        let h = build_histogram([0.0, 0.0, 0.25, 0.5, 1.0], 4, Policy::OpenLeaf).unwrap();
        assert_eq!(counts(&h), vec![0, 1, 1, 1]);
        assert_eq!(h.total(), 3);
        assert_eq!(h.bins()[0].low, 0.0);
    }

    #[test]
    fn open_leaf_range_starts_at_zero() {
        let h = build_histogram([0.4, 0.8], 2, Policy::OpenLeaf).unwrap();
        assert_eq!(h.bins()[0], Bin { low: 0.0, high: 0.4, count: 0 });
        assert_eq!(h.bins()[1], Bin { low: 0.4, high: 0.8, count: 2 });
    }

    #[test]
    fn zero_width_range() {
        let h = build_histogram(vec![0.3; 5], 10, Policy::FullRange).unwrap();
        assert_eq!(h.n_bins(), 10);
        assert_eq!(h.bins()[0].count, 5);
        assert_eq!(h.total(), 5);
        assert!(h.bins().iter().all(|b| b.low == 0.3 && b.high == 0.3));
    }

    #[rstest(/**/ values          , nbins, policy,
             case(vec![]          ,    10, Policy::FullRange),
             case(vec![]          ,    10, Policy::OpenLeaf),
             case(vec![0.0, 0.0]  ,    10, Policy::OpenLeaf),
             case(vec![0.5]       ,     0, Policy::FullRange),
             case(vec![f64::NAN]  ,    10, Policy::FullRange),
    )]
    fn degenerate(values: Vec<f64>, nbins: usize, policy: Policy) {
        let err = build_histogram(values, nbins, policy).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput(_)), "{err}");
    }

    #[test]
    fn from_sinogram() {
        let mut rows = vec![vec![0.0; 64]; 10];
        rows[0][30] = 1.0;
        rows[1][31] = 0.35;
        let sinogram = Sinogram::from_rows(rows, None).unwrap();
        let h = sinogram.histogram(DEFAULT_BINS, Policy::FullRange).unwrap();
        assert_eq!(h.n_bins(), 10);
        assert_eq!(h.iter().next(), Some(((0.0, 0.1), 638)));
        assert_eq!(counts(&h)[3], 1);
        assert_eq!(counts(&h)[9], 1);
    }

    #[test]
    fn display() {
        let h = build_histogram([0.0, 1.0], 2, Policy::FullRange).unwrap();
        let table = h.to_string();
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(2).unwrap().ends_with('1'));
    }

    fn open_times() -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(prop_oneof![Just(0.0), 0.0..=1.0_f64], 1..500)
    }

    proptest! {
        #[test]
        fn full_range_conserves_counts(values in open_times(), nbins in 1..60_usize) {
            let h = build_histogram(values.iter().copied(), nbins, Policy::FullRange).unwrap();
            prop_assert_eq!(h.n_bins(), nbins);
            prop_assert_eq!(h.total(), values.len());
        }

        #[test]
        fn open_leaf_conserves_counts(values in open_times(), nbins in 1..60_usize) {
            let open = values.iter().filter(|&&t| t > 0.0).count();
            match build_histogram(values.iter().copied(), nbins, Policy::OpenLeaf) {
                Ok(h)  => prop_assert_eq!(h.total(), open),
                Err(_) => prop_assert_eq!(open, 0),
            }
        }

        #[test]
        fn bins_tile_the_range(values in open_times(), nbins in 1..60_usize) {
            let h = build_histogram(values, nbins, Policy::FullRange).unwrap();
            for pair in h.bins().windows(2) {
                prop_assert_eq!(pair[0].high, pair[1].low);
            }
        }
    }
}
