//! # Workflows Module
//!
//! Complete user operations. Each workflow reads from a
//! [`DatasetStore`](crate::engine::store::DatasetStore), runs one of the pure
//! algorithms in [`crate::core`] and registers whatever it derives as a new
//! dataset, leaving the source in place.
//!
//! - **File I/O** ([`io`]) - CSV and FASTA import into the store, and export back out
//! - **Search** ([`search`]) - Filter into a derived dataset, or replace in place
//! - **Digestion** ([`digest`]) - Proteolytic digestion, inline or as a background task
//! - **Mass-Charge** ([`mass_charge`]) - Inclusion-list generation, inline or as a background task
//!
//! Digestion and mass-charge computation scale with dataset size, so both
//! expose a `task` builder for the [`TaskRunner`](crate::engine::runner::TaskRunner).
//! The caller registers the result from its completion callback.

pub mod digest;
pub mod io;
pub mod mass_charge;
pub mod search;

use crate::core::models::dataset::Dataset;
use crate::core::models::record::SequenceRecord;
use crate::engine::error::EngineError;

/// Linked records of `dataset`, or records rebuilt from its biological
/// columns when it is pure tabular data.
pub(crate) fn source_records(dataset: &Dataset) -> Result<Vec<SequenceRecord>, EngineError> {
    match dataset.records() {
        Some(records) => Ok(records.to_vec()),
        None => Ok(dataset.table().to_records()?),
    }
}
