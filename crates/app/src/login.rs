//! Login view
//!
//! Two text fields and a status message. Submitting sends the fields to the
//! password sign-in operation as typed; the service does all validation.

use crate::messages;
use crate::Outcome;
use petfyco_api_client::Backend;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Email/password sign-in screen
pub struct LoginView {
    backend: Arc<dyn Backend>,
    email: String,
    password: String,
    message: Option<String>,
}

impl LoginView {
    /// Create an empty login form
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            email: String::new(),
            password: String::new(),
            message: None,
        }
    }

    /// Update the email field
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Update the password field
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// Current email field
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message describing the last submit, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Sign in with the current field values
    #[instrument(skip(self), fields(email = %self.email))]
    pub async fn submit(&mut self) -> Outcome {
        let result = self
            .backend
            .sign_in_with_password(&self.email, &self.password)
            .await;

        match result {
            Ok(session) => {
                debug!(user_id = %session.user.id, "Login succeeded");
                self.message = Some(messages::SIGNED_IN.to_string());
                Outcome::Succeeded
            }
            Err(e) => {
                debug!(error = %e, "Login failed");
                self.message = Some(messages::error(&e.user_message()));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeBackend;

    #[tokio::test]
    async fn test_valid_credentials_show_ok() {
        let backend = Arc::new(FakeBackend::with_credentials("ana@example.com", "hunter22"));
        let mut view = LoginView::new(backend.clone());
        view.set_email("ana@example.com");
        view.set_password("hunter22");

        assert_eq!(view.submit().await, Outcome::Succeeded);
        assert_eq!(view.message(), Some("Ok!"));
        assert!(backend.current_user().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_credentials_show_service_error() {
        let backend = Arc::new(FakeBackend::with_credentials("ana@example.com", "hunter22"));
        let mut view = LoginView::new(backend);
        view.set_email("ana@example.com");
        view.set_password("wrong");

        assert_eq!(view.submit().await, Outcome::Failed);
        assert_eq!(view.message(), Some("Error: Invalid login credentials"));
    }

    #[tokio::test]
    async fn test_fields_are_sent_verbatim() {
        let backend = Arc::new(FakeBackend::default());
        let mut view = LoginView::new(backend.clone());
        view.set_email("  Ana@Example.com ");
        view.set_password("");

        view.submit().await;

        let sign_ins = backend.sign_ins.lock().unwrap();
        assert_eq!(sign_ins.as_slice(), [("  Ana@Example.com ".to_string(), String::new())]);
    }

    #[tokio::test]
    async fn test_message_starts_empty_and_tracks_last_submit() {
        let backend = Arc::new(FakeBackend::with_credentials("ana@example.com", "pw"));
        let mut view = LoginView::new(backend);
        assert_eq!(view.message(), None);

        view.set_email("ana@example.com");
        view.set_password("nope");
        view.submit().await;
        assert!(view.message().unwrap().starts_with("Error: "));

        view.set_password("pw");
        view.submit().await;
        assert_eq!(view.message(), Some("Ok!"));
    }
}
