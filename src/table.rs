use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use flate2::read::GzDecoder;

use crate::error::Result;

/// Row-oriented in-memory sensor table. Cells are kept as text; numeric
/// coercion happens in the preprocessor so failures can be reported per row.
#[derive(Clone, Debug, Default)]
pub struct SensorTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SensorTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices; handy for tests and synthetic traces.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Parse CSV with a header row. Ragged rows are accepted; missing cells
    /// and cells that are not valid UTF-8 surface later as unparseable
    /// values.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv.byte_headers()?.iter().map(lossy).collect();
        let mut rows = Vec::new();
        for record in csv.byte_records() {
            let record = record?;
            rows.push(record.iter().map(lossy).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Load `*.csv` or gzip-compressed `*.csv.gz`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        if is_gzip(path) {
            Self::from_csv_reader(BufReader::new(GzDecoder::new(file)))
        } else {
            Self::from_csv_reader(BufReader::new(file))
        }
    }

    /// Parse raw file bytes, decompressing when they carry the gzip magic.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(&[0x1f, 0x8b]) {
            Self::from_csv_reader(GzDecoder::new(bytes))
        } else {
            Self::from_csv_reader(bytes)
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

/// Invalid UTF-8 becomes U+FFFD, which never parses as a number.
fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map(|e| e == "gz").unwrap_or(false)
}
