//! Adapters between files and the two dataset views.
//!
//! Delimited text maps onto a [`Table`](crate::core::models::table::Table) and
//! FASTA onto a list of [`SequenceRecord`](crate::core::models::record::SequenceRecord)s.
//! Both share the [`traits::DatasetFile`] interface.

pub mod fasta;
pub mod tabular;
pub mod traits;
