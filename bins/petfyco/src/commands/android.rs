//! Android shell commands

use crate::context::AppContext;
use anyhow::Result;
use petfyco_android::{gradle, AndroidBuildDescriptor};
use petfyco_cli::output::{self, format_duration, Status};
use petfyco_core::error::{exit_codes, Error, ErrorCode};
use petfyco_telemetry::Timer;
use std::path::Path;

fn descriptor(ctx: &AppContext) -> AndroidBuildDescriptor {
    AndroidBuildDescriptor::from_config(&ctx.config.schema.android)
}

/// Render `build.gradle.kts` to stdout or a file
pub fn render(ctx: &AppContext, out: Option<&Path>) -> Result<i32> {
    let descriptor = descriptor(ctx);

    match out {
        Some(path) => {
            descriptor.write_to(path)?;
            if ctx.format.is_json() {
                output::print_json(&serde_json::json!({ "written": path }))?;
            } else {
                Status::success(&format!("Wrote {}", path.display()));
            }
        }
        None => {
            descriptor.validate()?;
            let rendered = descriptor.render_gradle_kts();
            if ctx.format.is_json() {
                output::print_json(&serde_json::json!({ "build_gradle_kts": rendered }))?;
            } else {
                print!("{rendered}");
            }
        }
    }

    Ok(exit_codes::SUCCESS)
}

/// Check the `[android]` section
pub fn validate(ctx: &AppContext) -> Result<i32> {
    let descriptor = descriptor(ctx);
    descriptor.validate()?;

    if ctx.format.is_json() {
        output::print_json(&serde_json::json!({ "valid": true, "descriptor": descriptor }))?;
    } else {
        Status::success(&format!("Android descriptor for {} is valid", descriptor.application_id));
    }

    Ok(exit_codes::SUCCESS)
}

/// Build an APK or bundle through the Gradle wrapper
pub fn build(ctx: &AppContext, project_dir: &Path, release: bool, bundle: bool) -> Result<i32> {
    let task = gradle::task_for(release, bundle);

    let spinner = ctx.spinner(&format!("Running {task}..."));
    let timer = Timer::start(task);
    let result = gradle::build(project_dir, release, bundle);
    let elapsed = timer.stop();
    spinner.finish_and_clear();

    let result = result?;
    if !result.success {
        return Err(Error::new(ErrorCode::GradleError, format!("{task} failed"))
            .with_context(result.combined_output())
            .into());
    }

    if ctx.format.is_json() {
        output::print_json(&serde_json::json!({
            "task": task,
            "duration_ms": elapsed.as_millis() as u64,
        }))?;
    } else {
        Status::success(&format!("{task} finished in {}", format_duration(elapsed)));
    }

    Ok(exit_codes::SUCCESS)
}
