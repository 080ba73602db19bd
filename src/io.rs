//! Getting sinograms in and out of files.

pub mod raw;
pub mod text;

use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::sinogram::Sinogram;

/// Supported sinogram file formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// RayStation CSV export
    Csv,
    /// Accuray raw binary
    Bin,
}

impl Format {

    /// Guess the format from the file extension
    pub fn of(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("bin") => Ok(Self::Bin),
            _ => Err(Error::Format(format!(
                "{}: expected a `.csv` or `.bin` file", path.display()))),
        }
    }
}

/// Read a sinogram from a CSV or BIN file, depending on its extension.
pub fn read_sinogram(path: &Path) -> Result<Sinogram> {
    let sinogram = match Format::of(path)? {
        Format::Csv => text::read_sinogram(path)?,
        Format::Bin =>  raw::read_sinogram(path)?,
    };
    info!("{}: {} projections x {} leaves", path.display(), sinogram.n_projections(), sinogram.n_leaves());
    Ok(sinogram)
}
