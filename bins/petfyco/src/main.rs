//! PetfyCo CLI
//!
//! Sign in to the hosted service, publish pets, and manage the Android shell.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use petfyco_api_client::ApiError;
use petfyco_app::Species;
use petfyco_cli::{output, OutputFormat};
use petfyco_core::config::Config;
use petfyco_core::error::exit_codes;
use petfyco_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;

use context::AppContext;

/// Sign in, publish pets and build the Android shell for PetfyCo
#[derive(Parser)]
#[command(name = "petfyco")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email, sent as typed
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long, env = "PETFYCO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Show the signed-in user
    Whoami,

    /// Sign out and forget the local session
    Logout,

    /// Publish a pet
    Publish {
        /// Name shown on the listing
        #[arg(long)]
        nombre: String,

        /// Species
        #[arg(long, default_value = "gato", value_parser = commands::publish::species_parser())]
        especie: Species,

        /// Listing status
        #[arg(long, default_value = petfyco_app::DEFAULT_ESTADO)]
        estado: String,
    },

    /// Android shell tools
    Android {
        #[command(subcommand)]
        action: AndroidAction,
    },
}

#[derive(Subcommand)]
enum AndroidAction {
    /// Render app/build.gradle.kts from the [android] config
    Render {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the [android] config without rendering
    Validate,

    /// Build through the Gradle wrapper
    Build {
        /// Build the release variant
        #[arg(long)]
        release: bool,

        /// Build an app bundle (AAB) instead of an APK
        #[arg(long)]
        bundle: bool,

        /// Directory containing gradlew
        #[arg(long, default_value = "android")]
        project_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    if let Err(e) = petfyco_telemetry::init_with_config(TelemetryConfig::for_verbosity(cli.verbose)) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    let result = run(cli.command, cli.config, cli.format).await;

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            report_error(&e, cli.format);
            exit(exit_code_for(&e))
        }
    }
}

async fn run(command: Commands, config: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<i32> {
    let config = Config::load(config.as_deref())?;
    tracing::debug!(path = ?config.path, "Configuration loaded");
    let ctx = AppContext::new(config, format);

    match command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Publish { nombre, especie, estado } => {
            commands::publish::run(&ctx, &nombre, especie, &estado).await
        }
        Commands::Android { action } => match action {
            AndroidAction::Render { output } => commands::android::render(&ctx, output.as_deref()),
            AndroidAction::Validate => commands::android::validate(&ctx),
            AndroidAction::Build { release, bundle, project_dir } => {
                commands::android::build(&ctx, &project_dir, release, bundle)
            }
        },
    }
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<petfyco_core::Error>() {
        return e.exit_code();
    }
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Config(_) | ApiError::MissingEnvVar(_) | ApiError::InvalidUrl(_)) => {
            exit_codes::CONFIG_ERROR
        }
        Some(ApiError::Timeout(_)) => exit_codes::TIMEOUT,
        Some(_) => exit_codes::BACKEND_ERROR,
        None => exit_codes::FAILURE,
    }
}

fn report_error(err: &anyhow::Error, format: OutputFormat) {
    if format.is_json() {
        let report = match err.downcast_ref::<petfyco_core::Error>() {
            Some(e) => serde_json::to_value(e.to_report()).unwrap_or_default(),
            None => serde_json::json!({ "message": error_text(err) }),
        };
        if output::print_json(&serde_json::json!({ "error": report })).is_ok() {
            return;
        }
    }
    eprintln!("{} {}", "Error:".red().bold(), error_text(err));
}

fn error_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(e) => e.user_message(),
        None => err.to_string(),
    }
}
