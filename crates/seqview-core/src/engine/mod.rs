//! # Engine Module
//!
//! The stateful half of the library. Everything here either owns datasets, owns
//! a worker thread, or carries the parameters that workflows hand to the pure
//! algorithms in [`crate::core`].
//!
//! - **Dataset Registry** ([`store`]) - uid-keyed datasets plus the dense display order
//! - **Background Execution** ([`runner`]) - Single-flight task runner with completion callbacks
//! - **Configuration** ([`config`]) - Digestion and mass-charge parameters with builders
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error taxonomy
//!
//! The store is a plain owned value. Mutations take `&mut self`, so a single
//! interactive control path serializes them without locks. The runner never
//! touches the store: work functions receive owned inputs and the caller
//! registers results when the completion callback fires.

pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
pub mod store;
