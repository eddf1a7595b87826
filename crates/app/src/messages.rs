//! User-facing status messages

/// Shown after a successful sign-in
pub const SIGNED_IN: &str = "Ok!";

/// Shown after a pet row was inserted
pub const PUBLISHED: &str = "Publicado!";

/// Shown when the publish screen opens without a session
pub const SIGN_IN_PROMPT: &str = "Inicia sesión en /";

/// Shown when publishing is attempted without a session
pub const SIGN_IN_REQUIRED: &str = "Inicia sesión";

/// Format an external failure for display
#[must_use]
pub fn error(text: &str) -> String {
    format!("Error: {text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_prefix() {
        assert_eq!(error("Invalid login credentials"), "Error: Invalid login credentials");
    }
}
