//! Endpoint-specific API implementations
//!
//! | Module | Service path | Description |
//! |--------|--------------|-------------|
//! | `auth` | `/auth/v1` | Password sign-in, refresh, current user, logout |
//! | `rest` | `/rest/v1/{table}` | Row inserts |

pub mod auth;
pub mod rest;

pub use auth::AuthApi;
pub use rest::TableApi;
