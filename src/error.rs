//! Errors raised while building, transforming and exporting sinograms.
//!
//! `Structural` and `DegenerateInput` come from the numeric core; the rest
//! come from the readers and writers that surround it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {

    /// More leaves than the MLC has.
    #[error("invalid number of mlc leaves: {leaves} (at most {max} allowed)")]
    Structural { leaves: usize, max: usize },

    #[error("ragged sinogram: projection {projection} has {found} leaves, expected {expected}")]
    Ragged { projection: usize, found: usize, expected: usize },

    /// The requested statistic is undefined for the given data.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("cannot shape open-times into projections: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: cannot parse `{field}` as a leaf-open-time")]
    Parse { line: usize, field: String },

    #[error("unsupported sinogram format: {0}")]
    Format(String),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("cannot render image: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn degenerate(what: impl Into<String>) -> Self {
        Self::DegenerateInput(what.into())
    }

    /// Both `Structural` and `Ragged` violate the shape of a sinogram.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. } | Self::Ragged { .. })
    }
}
