// src/extract/mod.rs
use crate::error::{PipelineError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::{cmp::Ordering, path::Path};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Header cells exactly as found in the sheet (untrimmed).
    pub headers: Vec<String>,
    /// Every data row below the header, one string per cell.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Cell `col` of `row`, or `""` when the row is shorter than that.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Render a calamine cell the way the transform expects to see it:
/// text verbatim, numbers in plain decimal notation, empty as `""`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Load the first sheet of the workbook at `path`.
///
/// The header is taken from absolute sheet row `skip_rows` (0-based) and
/// every following row is data; rows above it are title/metadata lines.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_workbook<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<RawTable> {
    let path = path.as_ref();
    info!("loading spreadsheet");

    if !path.exists() {
        return Err(PipelineError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let read_err = |source: calamine::Error| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(read_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(calamine::Error::Msg("workbook contains no sheets"))
        .and_then(|r| r)
        .map_err(read_err)?;
    // the workbook (and its file handle) is no longer needed
    drop(workbook);

    // calamine ranges begin at the first used cell, not at A1
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    debug!(first_row, size = ?range.get_size(), "sheet range");

    let mut table = RawTable::default();
    for (offset, cells) in range.rows().enumerate() {
        match (first_row + offset).cmp(&skip_rows) {
            Ordering::Less => {}
            Ordering::Equal => table.headers = cells.iter().map(cell_text).collect(),
            Ordering::Greater => table.rows.push(cells.iter().map(cell_text).collect()),
        }
    }

    info!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "spreadsheet read"
    );
    Ok(table)
}
