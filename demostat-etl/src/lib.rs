//! demostat-etl library interface
//!
//! Exposes the fetch clients, transform stages, loaders and the pipeline
//! orchestrator for integration testing.

pub mod fetch;
pub mod load;
pub mod pipeline;
pub mod transform;
pub mod viz;

pub use demostat_common::{Error, Result};
