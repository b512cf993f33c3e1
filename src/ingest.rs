//! Loading a statistics export into an in-memory [`RawTable`].
//!
//! The table is read once per session. Column kinds are inferred over every
//! row with the same candidate-elimination approach used for schema probing:
//! a column stays numeric while parseable values outnumber the rest.

use std::path::Path;

use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    data::{ColumnKind, parse_number},
    error::IngestError,
    io_utils,
};

pub const PLAYER_COLUMN: &str = "Player";
pub const TEAM_COLUMN: &str = "Team";
pub const AGE_COLUMN: &str = "Age";
pub const POSITION_COLUMN: &str = "Position";
pub const MINUTES_COLUMN: &str = "Minutes played";

pub const REQUIRED_COLUMNS: &[&str] = &[
    PLAYER_COLUMN,
    TEAM_COLUMN,
    AGE_COLUMN,
    POSITION_COLUMN,
    MINUTES_COLUMN,
];

/// Header row plus string cells, exactly as read from the export.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn require_columns(&self) -> Result<(), IngestError> {
        for required in REQUIRED_COLUMNS {
            if self.column_index(required).is_none() {
                return Err(IngestError::MissingColumn((*required).to_string()));
            }
        }
        Ok(())
    }

    /// Kind of every column, in header order.
    pub fn infer_kinds(&self) -> Vec<ColumnKind> {
        let mut candidates = vec![KindCandidate::default(); self.headers.len()];
        for row in &self.rows {
            for (idx, field) in row.iter().enumerate().take(candidates.len()) {
                candidates[idx].observe(field);
            }
        }
        candidates.iter().map(KindCandidate::decide).collect()
    }
}

#[derive(Debug, Clone, Default)]
struct KindCandidate {
    non_empty: usize,
    numeric: usize,
}

impl KindCandidate {
    fn observe(&mut self, field: &str) {
        if field.trim().is_empty() {
            return;
        }
        self.non_empty += 1;
        if parse_number(field).is_some() {
            self.numeric += 1;
        }
    }

    fn decide(&self) -> ColumnKind {
        if self.numeric > 0 && self.numeric * 2 > self.non_empty {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }
}

pub fn load_table(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<RawTable, IngestError> {
    info!(
        "Loading player table from '{}' with delimiter '{}'",
        path.display(),
        crate::printable_delimiter(delimiter)
    );
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, path, encoding)?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = io_utils::decode_record(&record, encoding)?;
        if decoded.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(decoded);
    }
    debug!("Read {} row(s) across {} column(s)", rows.len(), headers.len());

    let table = RawTable::new(headers, rows);
    table.require_columns()?;
    Ok(table)
}
