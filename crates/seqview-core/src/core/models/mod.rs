//! # Core Models Module
//!
//! The dual representation of a dataset: a generic [`table::Table`] of
//! string-coercible cells and, for biological data, a parallel list of
//! [`record::SequenceRecord`] values. A [`dataset::Dataset`] binds the two
//! under a [`ids::DatasetId`] and guarantees they never diverge in row count.
//!
//! ```ignore
//! use seqview::core::models::{record::SequenceRecord, table::Table};
//!
//! let records = vec![SequenceRecord::new("sp|P1|", "sp|P1|", "sp|P1| Demo", "MKPEPTIDER")];
//! let table = Table::from_records(&records);
//! assert_eq!(table.n_rows(), 1);
//! ```

pub mod dataset;
pub mod ids;
pub mod record;
pub mod table;
