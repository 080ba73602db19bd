//! Modulation factor: maximum leaf-open-time over mean open time of the
//! leaves that were actually used.
//!
//! Zero open-times (leaves blocked for the whole projection) are left out of
//! the mean.

use crate::error::{Error, Result};
use crate::sinogram::{OpenTime, Sinogram};
use crate::utils::{mean, min_max};

/// `max(open_times) / mean(open_times > 0)`
///
/// Fails with `Error::DegenerateInput` if no open-time is strictly positive.
pub fn modulation_factor(sinogram: &Sinogram) -> Result<f64> {
    modulation_factor_of(sinogram.open_times())
}

/// As `modulation_factor`, for any collection of open-times.
pub fn modulation_factor_of(open_times: impl IntoIterator<Item = OpenTime>) -> Result<f64> {
    let open: Vec<OpenTime> = open_times.into_iter().filter(|&t| t > 0.0).collect();
    let no_open_leaves = || Error::degenerate("modulation factor undefined: no leaf ever opens");
    let mean = mean(open.iter().copied()).ok_or_else(no_open_leaves)?;
    let (_, max) = min_max(open).ok_or_else(no_open_leaves)?;
    Ok(max / mean)
}

impl Sinogram {
    pub fn modulation_factor(&self) -> Result<f64> { modulation_factor(self) }
}
