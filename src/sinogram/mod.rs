//! Tomotherapy sinograms: leaf-open-times of the binary MLC, one row per
//! projection, one column per leaf.

pub mod axis;
pub mod crop;
pub mod unshuffle;

use std::fmt;
use std::ops::Range;

use log::debug;
use ndarray::{s, Array2, ArrayView1};

use crate::error::{Error, Result};
use crate::utils::min_max;

/// Number of leaves in the tomotherapy binary MLC
pub const MAX_LEAVES: usize = 64;

/// Number of discrete gantry angles per rotation
pub const N_ANGLES: usize = 51;

/// Fraction of a projection during which a leaf is open: nominally `0.0 ..= 1.0`
pub type OpenTime = f64;

/// Information carried alongside the open-times.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {

    /// Patient/plan identifier, as found in the header of the source file
    pub document_id: Option<String>,

    // Derived from the shape by `Sinogram::new`: never set by callers.
    cropped: bool,
}

impl Meta {
    pub fn new(document_id: Option<String>) -> Self {
        Self { document_id, cropped: false }
    }

    /// `true` whenever the sinogram has fewer than `MAX_LEAVES` leaves
    pub fn cropped(&self) -> bool { self.cropped }
}

/// Two-dimensional distribution of leaf-open-time vs. projection.
///
/// Rows are projections in delivery order; columns are leaves. Never
/// modified after construction: transforms return new sinograms.
#[derive(Clone, Debug, PartialEq)]
pub struct Sinogram {
    data: Array2<OpenTime>,
    meta: Meta,
}

impl Sinogram {

    /// Validate the shape of `data` and wrap it up with `meta`.
    ///
    /// Fails with `Error::Structural` if there are more than `MAX_LEAVES`
    /// leaves. Any `cropped` flag in `meta` is replaced by one derived from
    /// the number of leaves.
    pub fn new(data: Array2<OpenTime>, meta: Meta) -> Result<Self> {
        let leaves = data.ncols();
        if leaves > MAX_LEAVES {
            return Err(Error::Structural { leaves, max: MAX_LEAVES });
        }
        let meta = Meta { cropped: leaves < MAX_LEAVES, ..meta };
        debug!("sinogram: {} projections x {leaves} leaves", data.nrows());
        Ok(Self { data, meta })
    }

    /// Build from nested rows, checking that they all have the same length.
    pub fn from_rows(rows: Vec<Vec<OpenTime>>, document_id: Option<String>) -> Result<Self> {
        let n_projections = rows.len();
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((projection, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != expected) {
            return Err(Error::Ragged { projection, found: row.len(), expected });
        }
        let flat = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((n_projections, expected), flat)?;
        Self::new(data, Meta::new(document_id))
    }

    pub fn data(&self) -> &Array2<OpenTime> { &self.data }
    pub fn meta(&self) -> &Meta { &self.meta }

    pub fn document_id(&self) -> Option<&str> { self.meta.document_id.as_deref() }
    pub fn is_cropped (&self) -> bool          { self.meta.cropped }

    pub fn n_projections(&self) -> usize { self.data.nrows() }
    pub fn n_leaves     (&self) -> usize { self.data.ncols() }

    /// Projections in delivery order
    pub fn projections(&self) -> impl Iterator<Item = ArrayView1<'_, OpenTime>> + '_ {
        self.data.rows().into_iter()
    }

    /// All open-times, projection by projection
    pub fn open_times(&self) -> impl Iterator<Item = OpenTime> + '_ {
        self.data.iter().copied()
    }

    /// Smallest and largest open-time; `None` if there are no open-times at all.
    pub fn open_time_range(&self) -> Option<(OpenTime, OpenTime)> {
        min_max(self.open_times())
    }

    /// New sinogram containing only the projections in `range`, clamped to
    /// those that exist. Metadata is kept.
    pub fn select_projections(&self, range: Range<usize>) -> Self {
        let end   = range.end.min(self.n_projections());
        let start = range.start.min(end);
        Self {
            data: self.data.slice(s![start..end, ..]).to_owned(),
            meta: self.meta.clone(),
        }
    }
}

/// Free-function form of `Sinogram::new`.
pub fn validate_record(data: Array2<OpenTime>, meta: Meta) -> Result<Sinogram> {
    Sinogram::new(data, meta)
}

/// `Sinogram: 464 projections | 64 leaves | open time (0.0 -> 1.0)`
///
/// Writes nothing at all when there are no open-times, as the range is
/// undefined.
impl fmt::Display for Sinogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.open_time_range() {
            None => Ok(()),
            Some((lo, hi)) => write!(
                f, "Sinogram: {} projections | {} leaves | open time ({lo:?} -> {hi:?})",
                self.n_projections(), self.n_leaves(),
            ),
        }
    }
}
