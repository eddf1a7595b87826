//! Configuration schema definitions
//!
//! Every section has defaults, so an empty file (or no file at all) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Hosted backend connection settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Local session cache settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Android shell build descriptor
    #[serde(default)]
    pub android: AndroidConfig,
}

/// Hosted backend connection settings
///
/// Environment variables take precedence over these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: Option<String>,

    /// Public anon key sent as `apikey`
    #[serde(default)]
    pub anon_key: Option<String>,

    /// Table pet rows are inserted into
    #[serde(default = "default_pets_table")]
    pub pets_table: String,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            pets_table: default_pets_table(),
            timeout_secs: None,
        }
    }
}

fn default_pets_table() -> String {
    "pets".to_string()
}

/// Local session cache settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionConfig {
    /// Where the session file lives; defaults to the user config dir
    #[serde(default)]
    pub path: Option<String>,
}

/// Android application container settings
///
/// `None` for an SDK or version value means the Flutter Gradle plugin
/// provides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Kotlin/Java namespace
    #[serde(default = "default_application_id")]
    pub namespace: String,

    /// Play Store application id
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Compile SDK level
    #[serde(default)]
    pub compile_sdk: Option<u32>,

    /// Minimum supported SDK level
    #[serde(default)]
    pub min_sdk: Option<u32>,

    /// Target SDK level
    #[serde(default)]
    pub target_sdk: Option<u32>,

    /// NDK version string
    #[serde(default)]
    pub ndk_version: Option<String>,

    /// Version code
    #[serde(default)]
    pub version_code: Option<u32>,

    /// Version name
    #[serde(default)]
    pub version_name: Option<String>,

    /// Java source/target compatibility
    #[serde(default = "default_java_version")]
    pub java_version: u8,

    /// Enable core library desugaring
    #[serde(default = "default_true")]
    pub core_library_desugaring: bool,

    /// `com.android.tools:desugar_jdk_libs` version
    #[serde(default = "default_desugar_libs")]
    pub desugar_jdk_libs: String,

    /// Signing config used by the release build type
    #[serde(default = "default_release_signing")]
    pub release_signing: String,

    /// Enable R8 shrinking for release builds
    #[serde(default)]
    pub minify: bool,

    /// Relative path to the Flutter module
    #[serde(default = "default_flutter_source")]
    pub flutter_source: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            namespace: default_application_id(),
            application_id: default_application_id(),
            compile_sdk: None,
            min_sdk: None,
            target_sdk: None,
            ndk_version: None,
            version_code: None,
            version_name: None,
            java_version: default_java_version(),
            core_library_desugaring: true,
            desugar_jdk_libs: default_desugar_libs(),
            release_signing: default_release_signing(),
            minify: false,
            flutter_source: default_flutter_source(),
        }
    }
}

fn default_application_id() -> String {
    "com.example.petfyco".to_string()
}

fn default_java_version() -> u8 {
    17
}

fn default_true() -> bool {
    true
}

fn default_desugar_libs() -> String {
    "2.0.4".to_string()
}

fn default_release_signing() -> String {
    "debug".to_string()
}

fn default_flutter_source() -> String {
    "../..".to_string()
}
