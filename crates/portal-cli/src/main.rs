use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use portal_application::PortalSession;
use portal_core::{ApiMode, PortalConfig};
use portal_infrastructure::{ConfigService, PortalPaths};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Campus Portal CLI - student login and profile", long_about = None)]
struct Cli {
    /// Backend to try first (real or mock)
    #[arg(long, global = true, value_name = "MODE")]
    mode: Option<ApiMode>,

    /// Base URL of the student API
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Directory holding config.toml and session.json
    #[arg(long, global = true, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// Keep the session token in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the academic programs
    Programs,
    /// Log in and store the session token
    Login {
        /// Program id as listed by `portal programs`
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Show the profile of the logged-in student
    Profile,
    /// Forget the stored session token
    Logout,
    /// Show the backend mode and login state
    Status,
    /// Interactive shell sharing one session
    Shell,
    /// Inspect or edit config.toml
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Persist one setting
    Set { key: String, value: String },
    /// Write the default configuration if none exists
    Init,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Effective configuration: defaults, file, environment, then flags.
fn resolve_config(cli: &Cli, service: &ConfigService) -> Result<PortalConfig> {
    let mut config = service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(mode) = cli.mode {
        config.initial_mode = mode;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let paths = PortalPaths::new(cli.config_dir.as_deref());
    let config_service = ConfigService::new(&paths)?;

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => {
                let config = resolve_config(&cli, &config_service)?;
                commands::config::show(&config_service, &config)
            }
            ConfigAction::Set { key, value } => commands::config::set(&config_service, key, value),
            ConfigAction::Init => commands::config::init(&config_service),
        };
    }

    let config = resolve_config(&cli, &config_service)?;
    let session = PortalSession::from_config(&config, &paths, cli.ephemeral)
        .context("Failed to set up the portal session")?;

    let outcome = match cli.command {
        Commands::Programs => commands::programs::list(&session).await,
        Commands::Login {
            program,
            username,
            password,
        } => commands::auth::login(&session, program.as_deref(), &username, password).await,
        Commands::Profile => commands::auth::profile(&session).await,
        Commands::Logout => commands::auth::logout(&session),
        Commands::Status => commands::auth::status(&session),
        Commands::Shell => commands::shell::run(&session).await,
        Commands::Config { .. } => Ok(()),
    };

    println!("{}", commands::render::mode_banner(session.mode().await));
    outcome
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
