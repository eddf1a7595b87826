//! Supabase client for PetfyCo
//!
//! This crate talks to the hosted auth + database service that owns every
//! PetfyCo record. It provides:
//!
//! - **Environment-based configuration**: project URL and anon key from the
//!   environment, overlaid on `petfyco.toml`
//! - **Auth endpoints**: password sign-in, token refresh, current user, logout
//! - **REST endpoints**: single-row inserts into a named table
//! - **Session storage**: the signed-in session cached in memory or on disk
//! - **`Backend` capability**: the three operations the views need, as a trait
//!   so they can be tested against a fake
//!
//! # Example
//!
//! ```rust,no_run
//! use petfyco_api_client::{Backend, ClientConfig, MemorySessionStore, PetfycoClient, SupabaseBackend};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::development().with_anon_key("local-anon-key");
//!     let client = PetfycoClient::with_config(config)?;
//!     let backend = SupabaseBackend::new(client, Arc::new(MemorySessionStore::default()));
//!
//!     backend.sign_in_with_password("ana@example.com", "hunter22").await?;
//!     if let Some(user) = backend.current_user().await? {
//!         println!("Signed in as {}", user.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod session;

pub use backend::{Backend, SupabaseBackend};
pub use client::PetfycoClient;
pub use config::{ClientConfig, Environment};
pub use endpoints::auth::{Session, User};
pub use error::{ApiError, ApiResult};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backend::{Backend, SupabaseBackend};
    pub use crate::client::PetfycoClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{AuthApi, TableApi};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};
}
