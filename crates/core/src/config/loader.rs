//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist; otherwise the standard locations are
    /// searched and defaults are used when none is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.display().to_string()),
            None => find_config_file(Path::new(".")),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self {
            schema: toml::from_str(content)?,
            path: None,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file(root: &Path) -> Option<String> {
    let candidates = ["petfyco.toml", ".petfyco.toml", ".config/petfyco.toml"];

    candidates
        .iter()
        .map(|c| root.join(c))
        .find(|p| p.exists())
        .map(|p| p.display().to_string())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::ConfigError,
            format!("Failed to read config file {path}: {e}"),
        )
        .with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {path}: {e}"),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.backend.pets_table, "pets");
        assert_eq!(config.schema.android.java_version, 17);
        assert_eq!(config.schema.android.release_signing, "debug");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/petfyco.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[backend]
url = "https://demo.supabase.co"
pets_table = "mascotas"

[android]
application_id = "app.petfyco.mobile"
min_sdk = 24
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.schema.backend.url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.schema.backend.pets_table, "mascotas");
        assert_eq!(config.schema.android.application_id, "app.petfyco.mobile");
        assert_eq!(config.schema.android.min_sdk, Some(24));
        assert!(config.schema.android.core_library_desugaring);
        assert!(config.path.is_some());
    }

    #[test]
    fn test_find_config_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_file(dir.path()).is_none());

        std::fs::write(dir.path().join(".petfyco.toml"), "").unwrap();
        let found = find_config_file(dir.path()).unwrap();
        assert!(found.ends_with(".petfyco.toml"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml("[backend\nurl = 1").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
