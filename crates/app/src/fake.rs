//! In-memory backend used by the view tests

use async_trait::async_trait;
use petfyco_api_client::{ApiError, ApiResult, Backend, Session, User};
use std::sync::Mutex;
use uuid::Uuid;

/// Records every call and answers from canned state
#[derive(Default)]
pub struct FakeBackend {
    credentials: Option<(String, String)>,
    user: Mutex<Option<User>>,
    user_lookup_fails: bool,
    insert_error: Option<String>,
    pub sign_ins: Mutex<Vec<(String, String)>>,
    pub inserts: Mutex<Vec<(String, serde_json::Value)>>,
}

impl FakeBackend {
    /// Only `email`/`password` signs in
    pub fn with_credentials(email: &str, password: &str) -> Self {
        Self {
            credentials: Some((email.to_string(), password.to_string())),
            ..Self::default()
        }
    }

    /// Already signed in as a fresh user
    pub fn signed_in() -> (Self, User) {
        let user = user("ana@example.com");
        let fake = Self {
            user: Mutex::new(Some(user.clone())),
            ..Self::default()
        };
        (fake, user)
    }

    /// Inserts fail with `message`
    pub fn failing_inserts(mut self, message: &str) -> Self {
        self.insert_error = Some(message.to_string());
        self
    }

    /// `current_user` errors out
    pub fn failing_user_lookup(mut self) -> Self {
        self.user_lookup_fails = true;
        self
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }
}

pub fn user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.sign_ins
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));

        match &self.credentials {
            Some((e, p)) if e == email && p == password => {
                let user = user(email);
                *self.user.lock().unwrap() = Some(user.clone());
                Ok(Session {
                    access_token: "access".into(),
                    refresh_token: "refresh".into(),
                    token_type: "bearer".into(),
                    expires_in: 3600,
                    expires_at: None,
                    user,
                })
            }
            _ => Err(ApiError::api_response(400, "Invalid login credentials")),
        }
    }

    async fn current_user(&self) -> ApiResult<Option<User>> {
        if self.user_lookup_fails {
            return Err(ApiError::api_response(500, "auth service unavailable"));
        }
        Ok(self.user.lock().unwrap().clone())
    }

    async fn insert_row(&self, table: &str, row: serde_json::Value) -> ApiResult<()> {
        self.inserts.lock().unwrap().push((table.to_string(), row));
        match &self.insert_error {
            Some(message) => Err(ApiError::api_response(403, message.clone())),
            None => Ok(()),
        }
    }

    async fn sign_out(&self) -> ApiResult<()> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }
}
