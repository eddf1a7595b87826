//! CLI utilities for PetfyCo tools
//!
//! Provides shared CLI functionality:
//! - Status messages and output formats
//! - Spinners for network calls

#![warn(missing_docs)]

pub mod output;
pub mod progress;

pub use output::{OutputFormat, Status};
