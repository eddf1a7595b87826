//! Android shell tooling for PetfyCo
//!
//! The mobile app is a Flutter UI inside a native Android container. This
//! crate owns that container's build description:
//! - A typed build descriptor, validated and rendered to `build.gradle.kts`
//! - Gradle wrapper tasks for building APKs and bundles

#![warn(missing_docs)]

pub mod descriptor;
pub mod gradle;

pub use descriptor::{AndroidBuildDescriptor, Provided, ReleaseSigning};
