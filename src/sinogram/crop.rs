//! Symmetric removal of leaves which never open.

use log::debug;
use ndarray::{Array1, Axis};

use super::{Meta, Sinogram, MAX_LEAVES};

impl Sinogram {

    /// Leaves which are open (`> 0.0`) in at least one projection.
    pub fn active_leaves(&self) -> Array1<bool> {
        self.data().map_axis(Axis(0), |leaf| leaf.iter().any(|&t| t > 0.0))
    }

    /// Indices, in ascending order, of the leaves kept by `crop`: those that
    /// are active, or whose mirror image about the centre of the MLC is.
    pub fn retained_leaves(&self) -> Vec<usize> {
        let active = self.active_leaves();
        let n = active.len();
        (0..n)
            .filter(|&i| active[i] || active[n - 1 - i])
            .collect()
    }

    /// Return a symmetrically cropped sinogram, excluding unused opposing
    /// leaf pairs.
    ///
    /// The result is a new sinogram with all projections, in the original
    /// order. Its metadata is reset: the document ID is *not* carried over.
    /// A sinogram with no open leaves crops down to zero leaves.
    pub fn crop(&self) -> Sinogram {
        let keep = self.retained_leaves();
        debug!("crop: keeping {} of {} leaves", keep.len(), self.n_leaves());
        let data = self.data().select(Axis(1), &keep);
        // Never more leaves than before, so no need to revalidate
        let cropped = data.ncols() < MAX_LEAVES;
        Sinogram { data, meta: Meta { document_id: None, cropped } }
    }
}

/// Free-function form of `Sinogram::crop`.
pub fn crop(uncropped: &Sinogram) -> Sinogram { uncropped.crop() }
