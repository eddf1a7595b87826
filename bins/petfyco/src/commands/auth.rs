//! Session commands

use crate::context::AppContext;
use anyhow::Result;
use petfyco_app::LoginView;
use petfyco_cli::output::{self, Status};
use petfyco_core::error::{exit_codes, Error};
use petfyco_telemetry::Timer;

/// Sign in and remember the session
pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<i32> {
    let mut view = LoginView::new(ctx.backend()?);
    view.set_email(email);
    view.set_password(password);

    let spinner = ctx.spinner("Signing in...");
    let timer = Timer::start("login");
    let outcome = view.submit().await;
    timer.stop();
    spinner.finish_and_clear();

    super::report(ctx, outcome, view.message().unwrap_or_default())
}

/// Show who is signed in
pub async fn whoami(ctx: &AppContext) -> Result<i32> {
    let backend = ctx.backend()?;

    let spinner = ctx.spinner("Checking session...");
    let user = backend.current_user().await;
    spinner.finish_and_clear();

    let Some(user) = user? else {
        return Err(Error::no_session().into());
    };

    if ctx.format.is_json() {
        output::print_json(&user)?;
    } else {
        Status::header("Signed in");
        Status::field("id", &user.id.to_string());
        Status::field("email", user.email.as_deref().unwrap_or("-"));
        if let Some(role) = &user.role {
            Status::field("role", role);
        }
    }

    Ok(exit_codes::SUCCESS)
}

/// Sign out; the local session is dropped even if the service is unreachable
pub async fn logout(ctx: &AppContext) -> Result<i32> {
    ctx.backend()?.sign_out().await?;

    if ctx.format.is_json() {
        output::print_json(&serde_json::json!({ "signed_out": true }))?;
    } else {
        Status::success("Signed out");
    }

    Ok(exit_codes::SUCCESS)
}
