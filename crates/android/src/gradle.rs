//! Gradle build system integration
//!
//! Thin wrappers over the project's Gradle wrapper script.

use petfyco_core::error::{Error, ErrorCode, Result};
use petfyco_core::process::{run_command_in_dir, CommandResult};
use std::path::Path;
use tracing::info;

/// Name of the wrapper script on this platform
#[must_use]
pub fn wrapper_name() -> &'static str {
    if cfg!(windows) { "gradlew.bat" } else { "gradlew" }
}

/// Run a Gradle task through the wrapper in `project_dir`
pub fn run_task(project_dir: &Path, task: &str) -> Result<CommandResult> {
    let wrapper = project_dir.join(wrapper_name());
    if !wrapper.is_file() {
        return Err(Error::new(
            ErrorCode::GradleError,
            format!("Gradle wrapper not found in {}", project_dir.display()),
        )
        .with_suggestion("Run this from the Flutter project's android/ directory"));
    }

    info!(task, dir = %project_dir.display(), "Running Gradle task");
    let program = if cfg!(windows) {
        wrapper_name().to_string()
    } else {
        format!("./{}", wrapper_name())
    };
    run_command_in_dir(&program, &[task], project_dir)
}

/// Gradle task producing the requested artifact
#[must_use]
pub fn task_for(release: bool, bundle: bool) -> &'static str {
    match (release, bundle) {
        (false, false) => "assembleDebug",
        (true, false) => "assembleRelease",
        (false, true) => "bundleDebug",
        (true, true) => "bundleRelease",
    }
}

/// Build an APK or app bundle
pub fn build(project_dir: &Path, release: bool, bundle: bool) -> Result<CommandResult> {
    run_task(project_dir, task_for(release, bundle))
}

/// Build a debug APK
pub fn build_debug(project_dir: &Path) -> Result<CommandResult> {
    build(project_dir, false, false)
}

/// Build a release APK
pub fn build_release(project_dir: &Path) -> Result<CommandResult> {
    build(project_dir, true, false)
}

/// Build a release app bundle
pub fn bundle_release(project_dir: &Path) -> Result<CommandResult> {
    build(project_dir, true, true)
}

/// Clean build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_task(project_dir, "clean")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_for() {
        assert_eq!(task_for(false, false), "assembleDebug");
        assert_eq!(task_for(true, false), "assembleRelease");
        assert_eq!(task_for(false, true), "bundleDebug");
        assert_eq!(task_for(true, true), "bundleRelease");
    }

    #[test]
    fn test_missing_wrapper() {
        let dir = tempfile::tempdir().unwrap();
        let err = build(dir.path(), false, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::GradleError);
        assert!(err.suggestion.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_wrapper() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let wrapper = dir.path().join("gradlew");
        std::fs::write(&wrapper, "#!/bin/sh\necho \"task $1\"\n").unwrap();
        std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755)).unwrap();

        let result = clean(dir.path()).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout.trim(), "task clean");
    }
}
