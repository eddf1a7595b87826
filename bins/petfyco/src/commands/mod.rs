//! CLI command implementations

pub mod android;
pub mod auth;
pub mod publish;

use crate::context::AppContext;
use anyhow::Result;
use petfyco_app::Outcome;
use petfyco_cli::output::{self, Status};
use petfyco_core::error::exit_codes;
use serde::Serialize;

/// JSON output for view-driven commands
#[derive(Debug, Serialize)]
struct OutcomeReport<'a> {
    outcome: &'static str,
    message: &'a str,
}

/// Print the message a view ended with and pick the exit code
pub fn report(ctx: &AppContext, outcome: Outcome, message: &str) -> Result<i32> {
    if ctx.format.is_json() {
        output::print_json(&OutcomeReport {
            outcome: outcome_name(outcome),
            message,
        })?;
    } else {
        match outcome {
            Outcome::Succeeded => Status::success(message),
            Outcome::Failed => Status::error(message),
            Outcome::SignInRequired => Status::warning(message),
        }
    }

    Ok(match outcome {
        Outcome::Succeeded => exit_codes::SUCCESS,
        Outcome::Failed => exit_codes::BACKEND_ERROR,
        Outcome::SignInRequired => exit_codes::AUTH_ERROR,
    })
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Succeeded => "succeeded",
        Outcome::Failed => "failed",
        Outcome::SignInRequired => "sign_in_required",
    }
}
