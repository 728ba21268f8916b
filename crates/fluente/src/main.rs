mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use fluente_api::{ApiClient, TransportConfig};
use fluente_config::ServerConfig;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fluente", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a logged-in client
        cmd => {
            let server = build_server_config(&cli.global)?;
            let api = connect(&server).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &api, &cli.global).await
        }
    }
}

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
fn build_server_config(global: &cli::GlobalOpts) -> Result<ServerConfig, CliError> {
    let cfg = fluente_config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    // If a profile exists, resolve it, then layer CLI flag overrides on top
    let mut server = if let Some(profile) = cfg.profiles.get(&profile_name) {
        fluente_config::profile_to_server_config(profile, &profile_name)?
    } else {
        // No profile found -- build from flags / env vars alone
        let url_str = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
            path: fluente_config::config_path().display().to_string(),
        })?;
        let base_url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
        let email = global
            .email
            .clone()
            .ok_or_else(|| CliError::NoCredentials {
                profile: profile_name.clone(),
            })?;
        let password = std::env::var("FLUENTE_PASSWORD")
            .map(SecretString::from)
            .map_err(|_| CliError::NoCredentials {
                profile: profile_name.clone(),
            })?;
        ServerConfig {
            base_url,
            email,
            password,
            timeout: std::time::Duration::from_secs(global.timeout),
        }
    };

    if let Some(url_str) = global.server.as_deref() {
        server.base_url = url_str.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if let Some(email) = global.email.clone() {
        server.email = email;
    }
    server.timeout = std::time::Duration::from_secs(global.timeout);

    Ok(server)
}

/// Construct the API client and log in.
async fn connect(server: &ServerConfig) -> Result<ApiClient, CliError> {
    let transport = TransportConfig::with_timeout(server.timeout);
    let api = ApiClient::new(server.base_url.clone(), &transport)?;
    api.login(&server.email, &server.password).await?;
    Ok(api)
}
