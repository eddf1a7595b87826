//! REST table endpoints
//!
//! Maps to `/rest/v1/{table}`. Only inserts are needed: rows are created and
//! never updated or deleted from here.

use crate::client::PetfycoClient;
use crate::error::{ApiError, ApiResult};
use serde::Serialize;
use tracing::instrument;

/// Ask the service not to echo the inserted row back
const RETURN_MINIMAL: &str = "return=minimal";

/// A single REST table
#[derive(Clone)]
pub struct TableApi {
    client: PetfycoClient,
    table: String,
}

impl TableApi {
    /// Create a new table interface
    pub(crate) fn new(client: PetfycoClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Table name
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// URL of the table endpoint
    pub fn url(&self) -> ApiResult<String> {
        if !is_valid_table_name(&self.table) {
            return Err(ApiError::InvalidUrl(format!("invalid table name: {:?}", self.table)));
        }
        Ok(format!("{}/{}", self.client.config().rest_url(), self.table))
    }

    /// Insert one row
    ///
    /// POST /rest/v1/{table} with `Prefer: return=minimal`. Sent exactly once;
    /// calling this twice creates two rows.
    #[instrument(skip(self, row, access_token), fields(table = %self.table))]
    pub async fn insert<R: Serialize + ?Sized>(
        &self,
        row: &R,
        access_token: Option<&str>,
    ) -> ApiResult<()> {
        let url = self.url()?;
        self.client
            .post_no_content(&url, row, access_token, Some(RETURN_MINIMAL))
            .await
    }
}

/// Table names are plain identifiers; anything else would alter the path
fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn client() -> PetfycoClient {
        PetfycoClient::with_config(
            ClientConfig::development()
                .with_url("https://demo.supabase.co/")
                .with_anon_key("anon"),
        )
        .unwrap()
    }

    #[test]
    fn test_table_url() {
        let pets = client().from("pets");
        assert_eq!(pets.table(), "pets");
        assert_eq!(pets.url().unwrap(), "https://demo.supabase.co/rest/v1/pets");
    }

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("pets"));
        assert!(is_valid_table_name("_pets_2024"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("pets?select=*"));
        assert!(!is_valid_table_name("../auth"));
        assert!(!is_valid_table_name("2pets"));

        assert!(matches!(client().from("a/b").url(), Err(ApiError::InvalidUrl(_))));
    }
}
