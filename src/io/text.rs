//! Sinograms exported to CSV from RayStation.
//!
//! As produced by ExportTomoSinogram.py (RaySearch customer forum). The first
//! line holds patient demographics; every following line is one projection,
//! a label followed by one open-time per leaf.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::sinogram::{OpenTime, Sinogram};

/// Read sinogram from RayStation CSV file
pub fn read_sinogram(path: &Path) -> Result<Sinogram> {
    from_reader(BufReader::new(File::open(path)?))
}

pub fn from_reader(mut reader: impl BufRead) -> Result<Sinogram> {
    let mut header = String::new();
    reader.read_line(&mut header)?;
    let document_id = document_id(&header);
    if document_id.is_none() {
        warn!("no patient ID found in sinogram header: {:?}", header.trim_end());
    }
    Sinogram::from_rows(projections(reader)?, document_id)
}

/// `"{id} - {family name}, {given name}"` from the demographics line
///
/// e.g. `00000 - ANONYMOUS, PATIENT` from
/// `Patient name: ANONYMOUS^PATIENT, ID: 00000, ...`
pub fn document_id(header: &str) -> Option<String> {
    let id     = capture(&ID    , header)?;
    let family = capture(&FAMILY, header)?;
    let given  = capture(&GIVEN , header)?;
    Some(format!("{id} - {family}, {given}"))
}

static ID    : Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"ID: (\d*)"    ).ok());
static FAMILY: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"name: (\w*)\^").ok());
static GIVEN : Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\^(.*), ID:"  ).ok());

fn capture<'h>(re: &Option<Regex>, haystack: &'h str) -> Option<&'h str> {
    Some(re.as_ref()?.captures(haystack)?.get(1)?.as_str())
}

/// Parse every remaining line as a projection, dropping its label.
fn projections(reader: impl Read) -> Result<Vec<Vec<OpenTime>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for record in rdr.records() {
        let record = record?;
        // +1 for the demographics line consumed before the CSV reader started
        let line = record.position().map_or(0, |p| p.line() as usize) + 1;
        let row = record
            .iter()
            .skip(1)
            .map(|field| field.parse::<OpenTime>()
                 .map_err(|_| Error::Parse { line, field: field.to_string() }))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    const HEADER: &str = "Patient name: ANONYMOUS^PATIENT, ID: 00000, Plan: TOMO_1\n";

    fn csv_text(projections: usize, leaves: usize) -> String {
        let mut text = HEADER.to_string();
        for p in 0..projections {
            let times = (0..leaves).map(|l| if l == 31 + p % 2 { "0.75" } else { "0" });
            text += &format!("{},{}\n", p + 1, times.collect::<Vec<_>>().join(","));
        }
        text
    }

    #[test]
    fn header() {
        assert_eq!(document_id(HEADER).as_deref(), Some("00000 - ANONYMOUS, PATIENT"));
        assert_eq!(document_id("no demographics here"), None);
    }

    #[test]
    fn header_patterns_compile() {
        assert!(ID.is_some() && FAMILY.is_some() && GIVEN.is_some());
    }

    #[test]
    fn header_of_every_file() {
        let headers = [
            (HEADER, "00000 - ANONYMOUS, PATIENT"),
            ("Patient name: DOE^JANE MARY, ID: 4711, Plan: H&N", "4711 - DOE, JANE MARY"),
            ("Patient name: X^Y, ID: , Plan: empty", " - X, Y"),
        ];
        for (header, expected) in headers {
            assert_eq!(document_id(header).as_deref(), Some(expected));
        }
    }

    #[test]
    fn read_from_text() -> Result<()> {
        let sinogram = from_reader(Cursor::new(csv_text(464, 64)))?;
        assert_eq!(sinogram.document_id(), Some("00000 - ANONYMOUS, PATIENT"));
        assert_eq!(sinogram.data().dim(), (464, 64));
        assert!(sinogram.open_times().all(|t| (0.0..=1.0).contains(&t)));
        assert_eq!(sinogram.data()[[0, 31]], 0.75);
        assert_eq!(sinogram.data()[[1, 32]], 0.75);
        Ok(())
    }

    #[test]
    fn read_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sinogram.csv");
        std::fs::write(&path, csv_text(10, 64))?;
        assert_eq!(read_sinogram(&path)?.n_projections(), 10);
        Ok(())
    }

    #[test]
    fn missing_header_fields_are_not_fatal() -> Result<()> {
        let text = csv_text(3, 64).replacen("ID: 00000", "", 1);
        let sinogram = from_reader(Cursor::new(text))?;
        assert_eq!(sinogram.document_id(), None);
        Ok(())
    }

    #[test]
    fn too_many_leaves() {
        let err = from_reader(Cursor::new(csv_text(3, 65))).unwrap_err();
        assert!(matches!(err, Error::Structural { leaves: 65, .. }));
    }

    #[test]
    fn ragged() {
        let text = format!("{HEADER}1,0,0,0\n2,0,0\n");
        let err = from_reader(Cursor::new(text)).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn bad_value() {
        let text = format!("{HEADER}1,0,0,0\n2,0,zero,0\n");
        match from_reader(Cursor::new(text)) {
            Err(Error::Parse { line, field }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "zero");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn header_only() -> Result<()> {
        let sinogram = from_reader(Cursor::new(HEADER))?;
        assert_eq!(sinogram.n_projections(), 0);
        assert_eq!(sinogram.to_string(), "");
        Ok(())
    }
}
