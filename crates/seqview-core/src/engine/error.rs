use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use super::runner::{RunnerError, TaskError};
use crate::core::io::fasta::FastaError;
use crate::core::io::tabular::TabularError;
use crate::core::models::dataset::DatasetError;
use crate::core::models::ids::DatasetId;

/// How a caller addressed a dataset that turned out to be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Uid(DatasetId),
    Position(usize),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Uid(uid) => write!(f, "uid {:?}", uid),
            Lookup::Position(position) => write!(f, "position {}", position),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No dataset at {0}")]
    NotFound(Lookup),

    #[error("Display order must list each of the {expected} open dataset(s) once, got {given} uid(s) ({distinct} distinct)")]
    DisplayOrder {
        expected: usize,
        distinct: usize,
        given: usize,
    },

    #[error("Dataset is inconsistent: table has {table_rows} row(s) but {records} linked record(s)")]
    InconsistentDataset { table_rows: usize, records: usize },

    #[error("Table error: {0}")]
    Table(DatasetError),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] TabularError),

    #[error("FASTA error: {0}")]
    Fasta(#[from] FastaError),

    #[error("Dataset '{name}' has no linked sequence records")]
    NoRecords { name: String },

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error("Task failed: {0}")]
    Task(#[from] TaskError),
}

impl From<DatasetError> for EngineError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::InconsistentDataset {
                table_rows,
                records,
            } => EngineError::InconsistentDataset {
                table_rows,
                records,
            },
            other => EngineError::Table(other),
        }
    }
}

impl EngineError {
    /// True when the error is a busy rejection the caller may retry later.
    pub fn is_busy(&self) -> bool {
        matches!(self, EngineError::Runner(RunnerError::Busy { .. }))
    }
}
