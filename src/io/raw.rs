//! Read / write sinograms as raw binary: Accuray BIN files, as used in
//! calibration plans. Little-endian `f64`s, no header, `MAX_LEAVES` per
//! projection.

use std::fs::File;
use std::io::{Write, Read, BufWriter, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::sinogram::{Meta, OpenTime, Sinogram, MAX_LEAVES};

const WIDTH: usize = std::mem::size_of::<OpenTime>();

pub fn write(data: impl Iterator<Item = OpenTime>, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    for datum in data {
        buf.write_all(&datum.to_le_bytes())?;
    }
    buf.flush()
}

type IORes<T> = std::io::Result<T>;
pub fn read<'a>(path: &Path) -> IORes<impl Iterator<Item = IORes<OpenTime>> + 'a> {
    let file = File::open(path)?;
    let mut buf = BufReader::new(file);
    let mut buffer = [0; WIDTH];

    Ok(std::iter::from_fn(move || {
        use std::io::ErrorKind::UnexpectedEof;
        match buf.read_exact(&mut buffer) {
            Ok(()) => Some(Ok(OpenTime::from_le_bytes(buffer))),
            Err(e) if e.kind() == UnexpectedEof => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

/// Read a whole BIN file as a 64-leaf sinogram.
///
/// Fails with `Error::Format` if the file does not contain a whole number of
/// projections.
pub fn read_sinogram(path: &Path) -> Result<Sinogram> {
    // `read` silently drops a trailing partial value, so check up front
    let n_bytes = std::fs::metadata(path)?.len() as usize;
    if n_bytes % WIDTH != 0 {
        return Err(Error::Format(format!(
            "{}: {n_bytes} bytes is not a whole number of {WIDTH}-byte open-times", path.display())));
    }
    let values: Vec<OpenTime> = read(path)?.collect::<IORes<_>>()?;
    if values.len() % MAX_LEAVES != 0 {
        return Err(Error::Format(format!(
            "{}: {} open-times is not a whole number of {MAX_LEAVES}-leaf projections",
            path.display(), values.len())));
    }
    let data = Array2::from_shape_vec((values.len() / MAX_LEAVES, MAX_LEAVES), values)?;
    Sinogram::new(data, Meta::default())
}

/// Write `sinogram` in BIN layout. The file carries no shape information, so
/// only sinograms with `MAX_LEAVES` leaves can be read back.
pub fn write_sinogram(sinogram: &Sinogram, path: &Path) -> Result<()> {
    Ok(write(sinogram.open_times(), path)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn raw_io_roundtrip() -> std::io::Result<()> {
        // Harmless temporary location for output file
        let dir = tempdir()?;
        let file_path = dir.path().join("test.bin");

        // Some test data
        let original_data = vec![1.23, 4.56, 7.89];

        // Write data to file
        write(original_data.iter().copied(), &file_path)?;

        // Read data back from file
        let reloaded_data: Vec<_> = read(&file_path)?
            .collect::<IORes<_>>()?;

        // Check that roundtrip didn't corrupt the data
        assert_eq!(original_data, reloaded_data);
        Ok(())
    }

    #[test]
    fn sinogram_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("MLC_test.bin");

        let rows = (0..400).map(|p| (0..64).map(|l| ((p + l) % 5) as f64 / 4.0).collect()).collect();
        let original = Sinogram::from_rows(rows, None)?;
        write_sinogram(&original, &file_path)?;
        let reloaded = read_sinogram(&file_path)?;

        assert_eq!(reloaded.data().dim(), (400, 64));
        assert_eq!(reloaded, original);
        assert!(reloaded.open_times().all(|t| (0.0..=1.0).contains(&t)));
        Ok(())
    }

    #[test]
    fn partial_projection() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("short.bin");
        write(std::iter::repeat(0.5).take(64 + 3), &file_path)?;
        assert!(matches!(read_sinogram(&file_path), Err(Error::Format(_))));
        Ok(())
    }

    #[test]
    fn partial_value() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("ragged.bin");
        std::fs::write(&file_path, [0_u8; 64 * WIDTH + 5])?;
        assert!(matches!(read_sinogram(&file_path), Err(Error::Format(_))));
        Ok(())
    }

    #[test]
    fn empty_file() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("empty.bin");
        std::fs::write(&file_path, b"")?;
        let sinogram = read_sinogram(&file_path)?;
        assert_eq!(sinogram.data().dim(), (0, 64));
        assert_eq!(sinogram.to_string(), "");
        Ok(())
    }
}
