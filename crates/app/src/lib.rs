//! Login and publish view models for PetfyCo
//!
//! Each view holds its form fields and a status message that always reflects
//! the outcome of the last operation. Views talk to the hosted service only
//! through an injected [`Backend`](petfyco_api_client::Backend), so any front
//! end (the CLI, a GUI, tests) can drive them.
//!
//! # Example
//!
//! ```rust,no_run
//! use petfyco_app::{LoginView, PublishView, Species};
//! # async fn demo(backend: std::sync::Arc<dyn petfyco_api_client::Backend>) {
//! let mut login = LoginView::new(backend.clone());
//! login.set_email("ana@example.com");
//! login.set_password("hunter22");
//! login.submit().await;
//!
//! let mut publish = PublishView::new(backend);
//! publish.on_mount().await;
//! publish.set_nombre("Rex");
//! publish.set_especie(Species::Perro);
//! publish.submit().await;
//! println!("{}", publish.message().unwrap_or_default());
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod login;
pub mod messages;
pub mod pet;
pub mod publish;

#[cfg(test)]
mod fake;

pub use login::LoginView;
pub use pet::{NewPet, ParseSpeciesError, Species, DEFAULT_ESTADO};
pub use publish::PublishView;

/// How the last action of a view ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The service accepted the request
    Succeeded,
    /// The service (or the network) reported an error
    Failed,
    /// Nobody is signed in; nothing was sent
    SignInRequired,
}
