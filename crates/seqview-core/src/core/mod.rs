//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Sequence records, cells, tables and datasets
//! - **Chemistry** ([`chemistry`]) - Monoisotopic residue, water and proton masses
//! - **Digestion** ([`digest`]) - Proteolytic cleavage rules and fragment generation
//! - **Mass** ([`mass`]) - Peptide [M+H]+ computation and the inclusion policy
//! - **Search** ([`search`]) - Regex cell matching, row selection and substitution
//! - **File I/O** ([`io`]) - CSV and FASTA adapters for the two dataset views

pub mod chemistry;
pub mod digest;
pub mod io;
pub mod mass;
pub mod models;
pub mod search;
