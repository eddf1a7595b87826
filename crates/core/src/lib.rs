//! Core utilities for PetfyCo tools
//!
//! This crate provides shared functionality used by the API client, the view
//! models, the Android tooling and the CLI:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults for every section
//! - **Retry**: Backoff policies for idempotent network reads
//! - **Validation**: Fluent field validation used by the build descriptor
//! - **Process execution**: Running Gradle and friends with captured output
//!
//! # Example
//!
//! ```rust,no_run
//! use petfyco_core::config::Config;
//!
//! let config = Config::load(None).expect("config");
//! println!("Publishing into table {}", config.schema.backend.pets_table);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::RetryConfig;
    pub use crate::validation::{ValidationResult, Validator};
}
