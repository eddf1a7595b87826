//! Auth API endpoints
//!
//! Maps to the hosted auth service under `/auth/v1`:
//! - Password sign-in (`POST /token?grant_type=password`)
//! - Session refresh (`POST /token?grant_type=refresh_token`)
//! - Current user (`GET /user`)
//! - Logout (`POST /logout`)

use crate::client::PetfycoClient;
use crate::error::ApiResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Seconds before `expires_at` at which a session already counts as expired
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Auth API interface
#[derive(Clone)]
pub struct AuthApi {
    client: PetfycoClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: PetfycoClient) -> Self {
        Self { client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.client.config().auth_url())
    }

    /// Sign in with email and password
    ///
    /// POST /auth/v1/token?grant_type=password
    #[instrument(skip(self, password))]
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<Session> {
        let body = PasswordCredentials { email, password };
        let session: Session = self
            .client
            .post(&self.url("token?grant_type=password"), &body, None)
            .await?;
        debug!(user_id = %session.user.id, "Signed in");
        Ok(session.with_computed_expiry())
    }

    /// Exchange a refresh token for a new session
    ///
    /// POST /auth/v1/token?grant_type=refresh_token
    #[instrument(skip_all)]
    pub async fn refresh_session(&self, refresh_token: &str) -> ApiResult<Session> {
        let body = RefreshRequest { refresh_token };
        let session: Session = self
            .client
            .post(&self.url("token?grant_type=refresh_token"), &body, None)
            .await?;
        Ok(session.with_computed_expiry())
    }

    /// Fetch the user an access token belongs to
    ///
    /// GET /auth/v1/user
    #[instrument(skip_all)]
    pub async fn get_user(&self, access_token: &str) -> ApiResult<User> {
        self.client.get(&self.url("user"), Some(access_token)).await
    }

    /// Revoke the session on the server
    ///
    /// POST /auth/v1/logout
    #[instrument(skip_all)]
    pub async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        self.client
            .post_no_content(&self.url("logout"), &serde_json::json!({}), Some(access_token), None)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// A signed-in session as issued by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// JWT sent as bearer token
    pub access_token: String,
    /// Token used to obtain a new session
    pub refresh_token: String,
    /// Usually `bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at issue time
    #[serde(default)]
    pub expires_in: i64,
    /// Unix timestamp (seconds) the access token expires at
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// The user the session belongs to
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the service omitted it
    #[must_use]
    pub fn with_computed_expiry(mut self) -> Self {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(Utc::now().timestamp() + self.expires_in);
        }
        self
    }

    /// Whether the access token is expired (or about to be) at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now)
    }

    /// Whether the access token is expired now
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user id, referenced as `owner_id` by pet rows
    pub id: Uuid,
    /// Email address, when the user signed up with one
    #[serde(default)]
    pub email: Option<String>,
    /// Postgres role, normally `authenticated`
    #[serde(default)]
    pub role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION_JSON: &str = r#"{
        "access_token": "eyJhbGciOi.payload.sig",
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": 1700003600,
        "refresh_token": "r3fr3sh",
        "user": {
            "id": "6f1c2b1e-4a7d-4c8e-9d2a-0b1c2d3e4f50",
            "aud": "authenticated",
            "role": "authenticated",
            "email": "ana@example.com",
            "app_metadata": {"provider": "email"}
        }
    }"#;

    #[test]
    fn test_session_deserialize() {
        let session: Session = serde_json::from_str(SESSION_JSON).unwrap();
        assert_eq!(session.refresh_token, "r3fr3sh");
        assert_eq!(session.expires_at, Some(1_700_003_600));
        assert_eq!(session.user.email.as_deref(), Some("ana@example.com"));
        assert_eq!(
            session.user.id.to_string(),
            "6f1c2b1e-4a7d-4c8e-9d2a-0b1c2d3e4f50"
        );
    }

    #[test]
    fn test_session_expiry() {
        let session: Session = serde_json::from_str(SESSION_JSON).unwrap();
        assert!(!session.is_expired_at(1_700_000_000));
        assert!(session.is_expired_at(1_700_003_595));
        assert!(session.is_expired_at(1_700_010_000));
    }

    #[test]
    fn test_computed_expiry() {
        let mut session: Session = serde_json::from_str(SESSION_JSON).unwrap();
        session.expires_at = None;
        let session = session.with_computed_expiry();
        let expires_at = session.expires_at.unwrap();
        assert!(expires_at > Utc::now().timestamp());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_without_expiry_never_expires() {
        let mut session: Session = serde_json::from_str(SESSION_JSON).unwrap();
        session.expires_at = None;
        session.expires_in = 0;
        assert!(!session.with_computed_expiry().is_expired());
    }

    #[test]
    fn test_credentials_body() {
        let body = PasswordCredentials {
            email: "ana@example.com",
            password: "secret",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"email": "ana@example.com", "password": "secret"}));
    }
}
