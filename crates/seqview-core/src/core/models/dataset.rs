use super::ids::DatasetId;
use super::record::SequenceRecord;
use super::table::Table;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DatasetError {
    #[error("Dataset is inconsistent: table has {table_rows} row(s) but {records} linked record(s)")]
    InconsistentDataset { table_rows: usize, records: usize },

    #[error("Column '{column}' has {found} cell(s), expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Table has no '{0}' column required to build sequence records")]
    MissingColumn(String),
}

/// One unit of tabular data with optional linked sequence records.
///
/// When `records` is present, `records[i]` describes table row `i`; the two
/// views always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(crate) uid: DatasetId,
    pub name: String,
    pub(crate) table: Table,
    pub(crate) records: Option<Vec<SequenceRecord>>,
}

impl Dataset {
    /// Binds a table and optional records under `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InconsistentDataset`] if the record count does not
    /// match the table's row count.
    pub fn new(
        uid: DatasetId,
        name: impl Into<String>,
        table: Table,
        records: Option<Vec<SequenceRecord>>,
    ) -> Result<Self, DatasetError> {
        Self::validate(&table, records.as_deref())?;
        Ok(Self {
            uid,
            name: name.into(),
            table,
            records,
        })
    }

    pub(crate) fn validate(
        table: &Table,
        records: Option<&[SequenceRecord]>,
    ) -> Result<(), DatasetError> {
        match records {
            Some(records) if records.len() != table.n_rows() => {
                Err(DatasetError::InconsistentDataset {
                    table_rows: table.n_rows(),
                    records: records.len(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Store key assigned at registration; fixed for the dataset's lifetime.
    pub fn uid(&self) -> DatasetId {
        self.uid
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn records(&self) -> Option<&[SequenceRecord]> {
        self.records.as_deref()
    }

    pub fn has_records(&self) -> bool {
        self.records.is_some()
    }

    pub fn n_rows(&self) -> usize {
        self.table.n_rows()
    }
}
