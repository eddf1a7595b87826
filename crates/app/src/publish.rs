//! Publish view
//!
//! Form for listing a pet. Opening the screen checks for a session and only
//! warns; submitting checks again and refuses to send anything without one.
//! Each successful submit inserts one row, so submitting twice lists the pet
//! twice.

use crate::messages;
use crate::pet::{NewPet, ParseSpeciesError, Species, DEFAULT_ESTADO};
use crate::Outcome;
use petfyco_api_client::{Backend, User};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Table pet rows go to unless configured otherwise
pub const DEFAULT_TABLE: &str = "pets";

/// Pet publishing screen
pub struct PublishView {
    backend: Arc<dyn Backend>,
    table: String,
    nombre: String,
    especie: Species,
    estado: String,
    message: Option<String>,
}

impl PublishView {
    /// Create the form with default field values
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            table: DEFAULT_TABLE.to_string(),
            nombre: String::new(),
            especie: Species::default(),
            estado: DEFAULT_ESTADO.to_string(),
            message: None,
        }
    }

    /// Insert into `table` instead of the default
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Update the name field
    pub fn set_nombre(&mut self, nombre: impl Into<String>) {
        self.nombre = nombre.into();
    }

    /// Select a species
    pub fn set_especie(&mut self, especie: Species) {
        self.especie = especie;
    }

    /// Select a species from its stored value; anything but `perro`/`gato`
    /// is rejected and leaves the selection unchanged
    pub fn select_especie(&mut self, value: &str) -> Result<(), ParseSpeciesError> {
        self.especie = value.parse()?;
        Ok(())
    }

    /// Update the status field
    pub fn set_estado(&mut self, estado: impl Into<String>) {
        self.estado = estado.into();
    }

    /// Current name field
    #[must_use]
    pub fn nombre(&self) -> &str {
        &self.nombre
    }

    /// Current species selection
    #[must_use]
    pub fn especie(&self) -> Species {
        self.especie
    }

    /// Current status field
    #[must_use]
    pub fn estado(&self) -> &str {
        &self.estado
    }

    /// Message describing the last check or submit, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submitting is never disabled; [`submit`](Self::submit) does the guarding
    #[must_use]
    pub fn can_submit(&self) -> bool {
        true
    }

    /// Check for a session when the screen is shown
    #[instrument(skip(self))]
    pub async fn on_mount(&mut self) {
        if self.signed_in_user().await.is_none() {
            self.message = Some(messages::SIGN_IN_PROMPT.to_string());
        }
    }

    /// Publish the pet described by the form
    #[instrument(skip(self), fields(table = %self.table, especie = %self.especie))]
    pub async fn submit(&mut self) -> Outcome {
        let Some(user) = self.signed_in_user().await else {
            self.message = Some(messages::SIGN_IN_REQUIRED.to_string());
            return Outcome::SignInRequired;
        };

        let pet = NewPet {
            owner_id: user.id,
            nombre: self.nombre.clone(),
            especie: self.especie,
            estado: self.estado.clone(),
        };

        let result = match serde_json::to_value(&pet) {
            Ok(row) => self.backend.insert_row(&self.table, row).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                debug!(owner_id = %pet.owner_id, "Pet published");
                self.message = Some(messages::PUBLISHED.to_string());
                Outcome::Succeeded
            }
            Err(e) => {
                debug!(error = %e, "Publish failed");
                self.message = Some(messages::error(&e.user_message()));
                Outcome::Failed
            }
        }
    }

    /// The signed-in user; a failed lookup counts as signed out
    async fn signed_in_user(&self) -> Option<User> {
        match self.backend.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Could not determine the current user");
                None
            }
        }
    }
}
