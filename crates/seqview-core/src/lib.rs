//! # SeqView Core Library
//!
//! Keeps tabular data and linked biological sequence records in lock-step under a
//! stable dataset identifier, and applies the transformations a proteomics user
//! reaches for first: text search and filtering, proteolytic digestion, and
//! precursor m/z computation.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SequenceRecord`, `Table`,
//!   `Dataset`), chemistry tables, the pure digestion, mass and search algorithms,
//!   and CSV/FASTA adapters.
//!
//! - **[`engine`]: The Stateful Layer.** The `DatasetStore` registry with its
//!   display ordering, the single-flight `TaskRunner` used to offload heavy
//!   computations, configuration builders and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete user operations (import, filter,
//!   replace, digest, m/z) that read a dataset from the store, run the core
//!   algorithm and register the derived dataset.

pub mod core;
pub mod engine;
pub mod workflows;
