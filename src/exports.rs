pub use crate::error::{Error, Result};

pub use crate::sinogram::{Sinogram, Meta, OpenTime, validate_record, MAX_LEAVES, N_ANGLES};
pub use crate::sinogram::crop::crop;
pub use crate::sinogram::unshuffle::{unshuffle, angle_of};

pub use crate::histogram::{build_histogram, Histogram, Bin, Policy};
pub use crate::modulation::modulation_factor;
