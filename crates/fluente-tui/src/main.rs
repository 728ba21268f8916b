//! `fluente-tui` — terminal dashboard for the Fluente school platform.
//!
//! Built on [ratatui](https://ratatui.rs) with data fetched through
//! `fluente-api`. Screens are navigable via number keys (1-3): Dashboard,
//! Students, and Payments; the Payments screen hosts the create-payment
//! form with its remote select pickers.
//!
//! Logs are written to a file (default `/tmp/fluente-tui.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fluente_api::{ApiClient, TransportConfig};
use fluente_config::ServerConfig;

use crate::app::App;

/// Terminal dashboard for the Fluente language-school platform.
#[derive(Parser, Debug)]
#[command(name = "fluente-tui", version, about)]
struct Cli {
    /// Backend URL (e.g., http://localhost:3000)
    #[arg(short = 's', long, env = "FLUENTE_SERVER")]
    server: Option<String>,

    /// Login email
    #[arg(short = 'e', long, env = "FLUENTE_EMAIL")]
    email: Option<String>,

    /// Backend profile from the config file
    #[arg(short = 'p', long, env = "FLUENTE_PROFILE")]
    profile: Option<String>,

    /// Log file path
    #[arg(long, default_value = "/tmp/fluente-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fluente_tui={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("fluente-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Build a [`ServerConfig`] from CLI flags, if a server was provided.
fn server_from_flags(cli: &Cli) -> Option<Result<ServerConfig>> {
    let server = cli.server.as_deref()?;
    let base_url = match server.parse() {
        Ok(url) => url,
        Err(_) => return Some(Err(eyre!("invalid server URL: {server}"))),
    };
    let email = cli.email.clone()?;
    let password = std::env::var("FLUENTE_PASSWORD").ok().map(SecretString::from)?;
    Some(Ok(ServerConfig {
        base_url,
        email,
        password,
        timeout: std::time::Duration::from_secs(30),
    }))
}

/// Try loading a server config from the shared config file.
fn server_from_config(cli: &Cli) -> Option<ServerConfig> {
    let cfg = fluente_config::load_config().ok()?;
    let profile_name = cli
        .profile
        .clone()
        .or(cfg.default_profile)
        .unwrap_or_else(|| "default".into());
    let profile = cfg.profiles.get(&profile_name)?;
    fluente_config::profile_to_server_config(profile, &profile_name).ok()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        server = cli.server.as_deref().unwrap_or("(from config)"),
        "starting fluente-tui"
    );

    // Priority: CLI flags > config file
    let server = match server_from_flags(&cli) {
        Some(result) => result?,
        None => server_from_config(&cli).ok_or_else(|| {
            eyre!(
                "no backend configured -- pass --server/--email with FLUENTE_PASSWORD set, \
                 or run: fluente config init"
            )
        })?,
    };

    // Log in before entering the alternate screen so auth errors print
    // like normal CLI errors.
    let transport = TransportConfig::with_timeout(server.timeout);
    let api = ApiClient::new(server.base_url.clone(), &transport)?;
    api.login(&server.email, &server.password)
        .await
        .map_err(|err| eyre!("login failed: {err}"))?;

    let mut app = App::new(Arc::new(api));
    app.run().await
}
