//! The backend capability consumed by the views
//!
//! Views only ever need three things from the hosted service: sign in, ask
//! who is signed in, and insert a row. They receive an `Arc<dyn Backend>` so
//! tests can hand them a fake.

use crate::client::PetfycoClient;
use crate::endpoints::auth::{Session, User};
use crate::error::ApiResult;
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Operations the views perform against the hosted service
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sign in with email and password, establishing a session
    async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<Session>;

    /// The signed-in user, or `None` when there is no usable session
    async fn current_user(&self) -> ApiResult<Option<User>>;

    /// Insert a single row into `table`
    async fn insert_row(&self, table: &str, row: serde_json::Value) -> ApiResult<()>;

    /// End the session
    async fn sign_out(&self) -> ApiResult<()>;
}

/// `Backend` over the Supabase HTTP API with a local session cache
#[derive(Clone)]
pub struct SupabaseBackend {
    client: PetfycoClient,
    sessions: Arc<dyn SessionStore>,
}

impl SupabaseBackend {
    /// Create a backend using `sessions` to remember who is signed in
    pub fn new(client: PetfycoClient, sessions: Arc<dyn SessionStore>) -> Self {
        Self { client, sessions }
    }

    /// The underlying client
    #[must_use]
    pub fn client(&self) -> &PetfycoClient {
        &self.client
    }

    /// A usable session: the cached one, refreshed if it has expired
    async fn active_session(&self) -> ApiResult<Option<Session>> {
        let Some(session) = self.sessions.load()? else {
            return Ok(None);
        };

        if !session.is_expired() {
            return Ok(Some(session));
        }

        debug!(user_id = %session.user.id, "Session expired, refreshing");
        match self.client.auth().refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.sessions.save(&fresh)?;
                Ok(Some(fresh))
            }
            Err(e) if e.is_client_error() => {
                warn!(error = %e, "Refresh token rejected, signing out locally");
                self.sessions.clear()?;
                Ok(None)
            }
            // The refresh token may still be good; keep it for the next attempt
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl Backend for SupabaseBackend {
    #[instrument(skip(self, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<Session> {
        let session = self
            .client
            .auth()
            .sign_in_with_password(email, password)
            .await?;
        self.sessions.save(&session)?;
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> ApiResult<Option<User>> {
        let Some(session) = self.active_session().await? else {
            return Ok(None);
        };

        match self.client.auth().get_user(&session.access_token).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => {
                warn!(error = %e, "Access token rejected, signing out locally");
                self.sessions.clear()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, row))]
    async fn insert_row(&self, table: &str, row: serde_json::Value) -> ApiResult<()> {
        let session = self.active_session().await?;
        let token = session.as_ref().map(|s| s.access_token.as_str());
        self.client.from(table).insert(&row, token).await
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> ApiResult<()> {
        if let Some(session) = self.sessions.load()? {
            // Server-side revocation is best effort; the local session goes regardless
            if let Err(e) = self.client.auth().sign_out(&session.access_token).await {
                warn!(error = %e, "Server-side logout failed");
            }
        }
        self.sessions.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::MemorySessionStore;
    use crate::session::tests::session;
    use petfyco_core::retry::RetryConfig;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    /// A backend pointed at a port nothing listens on
    fn offline_backend() -> (SupabaseBackend, Arc<MemorySessionStore>) {
        let config = ClientConfig::development()
            .with_url("http://127.0.0.1:9")
            .with_anon_key("anon")
            .with_timeout(Duration::from_secs(2))
            .with_retry(RetryConfig::no_retry());
        let store = Arc::new(MemorySessionStore::default());
        let backend = SupabaseBackend::new(PetfycoClient::with_config(config).unwrap(), store.clone());
        (backend, store)
    }

    #[tokio::test]
    async fn test_no_session_means_no_user() {
        let (backend, _) = offline_backend();
        assert!(backend.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_refresh_keeps_session() {
        let (backend, store) = offline_backend();
        let expired = session(Some(1));
        store.save(&expired).unwrap();

        assert_err!(backend.current_user().await);
        assert_eq!(store.load().unwrap(), Some(expired));
    }

    #[tokio::test]
    async fn test_sign_out_clears_local_session_even_offline() {
        let (backend, store) = offline_backend();
        store.save(&session(None)).unwrap();

        assert_ok!(backend.sign_out().await);
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_user_lookup_is_an_error() {
        let (backend, store) = offline_backend();
        store.save(&session(None)).unwrap();

        assert_err!(backend.current_user().await);
        assert!(store.load().unwrap().is_some());
    }
}
