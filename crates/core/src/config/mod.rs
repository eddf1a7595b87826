//! Configuration loading and schema definitions
//!
//! Shared configuration types for the backend client, session cache and
//! Android shell.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
