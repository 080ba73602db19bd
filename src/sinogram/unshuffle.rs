//! Regroup projections by gantry angle.
//!
//! During delivery the gantry cycles through `N_ANGLES` discrete angles, one
//! projection each, over and over. Projection `k` was therefore delivered at
//! angle `k % N_ANGLES`, and collecting all projections with the same angle
//! gives something analogous to a fluence map for that angle.

use ndarray::{Array2, Axis};

use super::{OpenTime, Sinogram, N_ANGLES};

/// Distribute `projections` round-robin over `N_ANGLES` buckets.
///
/// Always returns exactly `N_ANGLES` buckets, some of which may be empty.
/// Projections keep their relative order within each bucket.
pub fn unshuffle<T>(projections: impl IntoIterator<Item = T>) -> Vec<Vec<T>> {
    let mut buckets: Vec<Vec<T>> = std::iter::repeat_with(Vec::new).take(N_ANGLES).collect();
    for (k, projection) in projections.into_iter().enumerate() {
        buckets[k % N_ANGLES].push(projection);
    }
    buckets
}

/// Gantry angle in degrees of the projections in `bucket`
pub fn angle_of(bucket: usize) -> f64 {
    (bucket % N_ANGLES) as f64 * 360.0 / N_ANGLES as f64
}

impl Sinogram {

    /// One `projections x leaves` array per gantry angle, `N_ANGLES` in all.
    pub fn unshuffle(&self) -> Vec<Array2<OpenTime>> {
        unshuffle(0..self.n_projections())
            .into_iter()
            .map(|rows| self.data().select(Axis(0), &rows))
            .collect()
    }

    /// Gantry angle, in degrees, and number of projections delivered there
    pub fn angles(&self) -> Vec<(f64, usize)> {
        unshuffle(0..self.n_projections())
            .iter()
            .enumerate()
            .map(|(bucket, rows)| (angle_of(bucket), rows.len()))
            .collect()
    }
}
