// src/error.rs

use arrow::error::ArrowError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input spreadsheet path does not resolve to a file.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The spreadsheet exists but could not be opened or read
    /// (locked by another process, corrupt, unsupported format, no sheets).
    #[error("failed to read spreadsheet {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// An identifying column (municipality or network) is absent from the header row.
    #[error("required column {0:?} not found in header row")]
    MissingColumn(String),

    /// Rate columns absent from the source while strict column checking is on.
    #[error("source is missing expected columns: {}", .0.join(", "))]
    SchemaMismatch(Vec<String>),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    /// True for the "file not found" boundary condition; every other variant
    /// counts as a generic read/processing failure.
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
