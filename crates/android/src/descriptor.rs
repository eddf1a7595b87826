//! Android application container descriptor
//!
//! Describes how the Flutter app is packaged as an Android application:
//! identifiers, SDK bounds, Java interop and desugaring, and release signing.
//! The descriptor is validated here and rendered to the `build.gradle.kts`
//! the platform toolchain consumes.

use petfyco_core::config::AndroidConfig;
use petfyco_core::error::{Result, ResultExt};
use petfyco_core::validation::Validator;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// Oldest Java level the Android Gradle plugin still accepts
const MIN_JAVA_VERSION: u8 = 8;

/// Newest Java level we render
const MAX_JAVA_VERSION: u8 = 21;

/// Highest API level we accept as an explicit SDK value
const MAX_SDK_LEVEL: u32 = 40;

/// A value either supplied by the Flutter Gradle plugin or pinned explicitly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provided<T> {
    /// Read from the `flutter` extension at build time
    Flutter,
    /// Pinned in the descriptor
    Explicit(T),
}

impl<T> Provided<T> {
    fn explicit(&self) -> Option<&T> {
        match self {
            Self::Flutter => None,
            Self::Explicit(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Provided<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Flutter, Self::Explicit)
    }
}

/// Signing config used by the release build type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseSigning {
    /// Placeholder: sign release builds with the debug key
    Debug,
    /// A signing config declared elsewhere in the Gradle project
    Named(String),
}

impl ReleaseSigning {
    fn name(&self) -> &str {
        match self {
            Self::Debug => "debug",
            Self::Named(name) => name,
        }
    }
}

/// Everything `app/build.gradle.kts` declares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidBuildDescriptor {
    /// Kotlin/Java namespace
    pub namespace: String,
    /// Application id
    pub application_id: String,
    /// Compile SDK level
    pub compile_sdk: Provided<u32>,
    /// Minimum SDK level
    pub min_sdk: Provided<u32>,
    /// Target SDK level
    pub target_sdk: Provided<u32>,
    /// NDK version
    pub ndk_version: Provided<String>,
    /// Version code
    pub version_code: Provided<u32>,
    /// Version name
    pub version_name: Provided<String>,
    /// Java source/target compatibility and JVM target
    pub java_version: u8,
    /// Whether core library desugaring is on
    pub core_library_desugaring: bool,
    /// `desugar_jdk_libs` version
    pub desugar_jdk_libs: String,
    /// Release signing
    pub release_signing: ReleaseSigning,
    /// R8 shrinking for release builds
    pub minify: bool,
    /// Relative path to the Flutter module
    pub flutter_source: String,
}

impl Default for AndroidBuildDescriptor {
    fn default() -> Self {
        Self::from_config(&AndroidConfig::default())
    }
}

impl AndroidBuildDescriptor {
    /// Build a descriptor from the `[android]` config section
    #[must_use]
    pub fn from_config(config: &AndroidConfig) -> Self {
        let release_signing = match config.release_signing.as_str() {
            "debug" => ReleaseSigning::Debug,
            name => ReleaseSigning::Named(name.to_string()),
        };

        Self {
            namespace: config.namespace.clone(),
            application_id: config.application_id.clone(),
            compile_sdk: config.compile_sdk.into(),
            min_sdk: config.min_sdk.into(),
            target_sdk: config.target_sdk.into(),
            ndk_version: config.ndk_version.clone().into(),
            version_code: config.version_code.into(),
            version_name: config.version_name.clone().into(),
            java_version: config.java_version,
            core_library_desugaring: config.core_library_desugaring,
            desugar_jdk_libs: config.desugar_jdk_libs.clone(),
            release_signing,
            minify: config.minify,
            flutter_source: config.flutter_source.clone(),
        }
    }

    /// Check the descriptor for mistakes the Gradle build would only catch late
    pub fn validate(&self) -> Result<()> {
        let mut validator = Validator::new()
            .java_package("namespace", &self.namespace)
            .java_package("application_id", &self.application_id)
            .range("java_version", self.java_version, MIN_JAVA_VERSION, MAX_JAVA_VERSION)
            .required("flutter_source", &self.flutter_source)
            .required("release_signing", self.release_signing.name())
            .check(
                "desugar_jdk_libs",
                !self.core_library_desugaring || !self.desugar_jdk_libs.trim().is_empty(),
                "Desugaring is enabled but no desugar_jdk_libs version is set",
            );

        for (field, value) in [
            ("compile_sdk", &self.compile_sdk),
            ("min_sdk", &self.min_sdk),
            ("target_sdk", &self.target_sdk),
        ] {
            if let Some(level) = value.explicit() {
                validator = validator.range(field, *level, 1, MAX_SDK_LEVEL);
            }
        }

        if let (Some(min), Some(target)) = (self.min_sdk.explicit(), self.target_sdk.explicit()) {
            validator = validator.ordered("min_sdk", *min, "target_sdk", *target);
        }
        if let (Some(target), Some(compile)) =
            (self.target_sdk.explicit(), self.compile_sdk.explicit())
        {
            validator = validator.ordered("target_sdk", *target, "compile_sdk", *compile);
        }
        if let Some(code) = self.version_code.explicit() {
            validator = validator.range("version_code", *code, 1, 2_100_000_000);
        }

        validator
            .validate()
            .to_result()
            .context("Checking the Android build descriptor")
    }

    /// Render the module's `build.gradle.kts`
    #[must_use]
    pub fn render_gradle_kts(&self) -> String {
        let java = java_version_constant(self.java_version);
        let mut out = String::new();

        out.push_str("plugins {\n");
        out.push_str("    id(\"com.android.application\")\n");
        out.push_str("    id(\"kotlin-android\")\n");
        out.push_str("    // The Flutter Gradle plugin must be applied after the Android and Kotlin plugins\n");
        out.push_str("    id(\"dev.flutter.flutter-gradle-plugin\")\n");
        out.push_str("}\n\n");

        out.push_str("android {\n");
        let _ = writeln!(out, "    namespace = {}", quote(&self.namespace));
        let _ = writeln!(out, "    compileSdk = {}", number(&self.compile_sdk, "compileSdkVersion"));
        let _ = writeln!(out, "    ndkVersion = {}", text(&self.ndk_version, "ndkVersion"));
        out.push('\n');

        out.push_str("    defaultConfig {\n");
        let _ = writeln!(out, "        applicationId = {}", quote(&self.application_id));
        let _ = writeln!(out, "        minSdk = {}", number(&self.min_sdk, "minSdkVersion"));
        let _ = writeln!(out, "        targetSdk = {}", number(&self.target_sdk, "targetSdkVersion"));
        let _ = writeln!(out, "        versionCode = {}", number(&self.version_code, "versionCode"));
        let _ = writeln!(out, "        versionName = {}", text(&self.version_name, "versionName"));
        out.push_str("    }\n\n");

        out.push_str("    compileOptions {\n");
        let _ = writeln!(out, "        sourceCompatibility = {java}");
        let _ = writeln!(out, "        targetCompatibility = {java}");
        if self.core_library_desugaring {
            out.push_str("        isCoreLibraryDesugaringEnabled = true\n");
        }
        out.push_str("    }\n\n");

        out.push_str("    kotlinOptions {\n");
        let _ = writeln!(out, "        jvmTarget = {java}.toString()");
        out.push_str("    }\n\n");

        out.push_str("    buildTypes {\n");
        out.push_str("        release {\n");
        if self.release_signing == ReleaseSigning::Debug {
            out.push_str("            // Signed with the debug key until a release keystore exists\n");
        }
        let _ = writeln!(
            out,
            "            signingConfig = signingConfigs.getByName({})",
            quote(self.release_signing.name())
        );
        if self.minify {
            out.push_str("            isMinifyEnabled = true\n");
            out.push_str("            proguardFiles(\n");
            out.push_str("                getDefaultProguardFile(\"proguard-android-optimize.txt\"),\n");
            out.push_str("                \"proguard-rules.pro\"\n");
            out.push_str("            )\n");
        }
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str("flutter {\n");
        let _ = writeln!(out, "    source = {}", quote(&self.flutter_source));
        out.push_str("}\n");

        if self.core_library_desugaring {
            out.push_str("\ndependencies {\n");
            let _ = writeln!(
                out,
                "    coreLibraryDesugaring({})",
                quote(&format!("com.android.tools:desugar_jdk_libs:{}", self.desugar_jdk_libs))
            );
            out.push_str("}\n");
        }

        out
    }

    /// Validate, then write `build.gradle.kts` to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render_gradle_kts())
            .map_err(petfyco_core::Error::from)
            .context(format!("Writing {}", path.display()))?;
        debug!(path = %path.display(), "Wrote Gradle build file");
        Ok(())
    }
}

fn java_version_constant(version: u8) -> String {
    match version {
        8 => "JavaVersion.VERSION_1_8".to_string(),
        v => format!("JavaVersion.VERSION_{v}"),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$"))
}

fn number(value: &Provided<u32>, flutter_property: &str) -> String {
    match value {
        Provided::Flutter => format!("flutter.{flutter_property}"),
        Provided::Explicit(n) => n.to_string(),
    }
}

fn text(value: &Provided<String>, flutter_property: &str) -> String {
    match value {
        Provided::Flutter => format!("flutter.{flutter_property}"),
        Provided::Explicit(s) => quote(s),
    }
}
