//! Shared types for the demostat pipeline
//!
//! Holds the error type, TOML configuration and the record model used by
//! every stage of the ETL.

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
