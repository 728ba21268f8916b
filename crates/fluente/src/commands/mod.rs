//! Command handlers, one module per resource.

pub mod classes;
pub mod config_cmd;
pub mod consultants;
pub mod contents;
pub mod dashboard;
pub mod lessons;
pub mod payments;
pub mod students;
pub mod util;

use fluente_api::ApiClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    api: &ApiClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Students(args) => students::handle(api, args, global).await,
        Command::Consultants(args) => consultants::handle(api, args, global).await,
        Command::Classes(args) => classes::handle(api, args, global).await,
        Command::Contents(args) => contents::handle(api, args, global).await,
        Command::Lessons(args) => lessons::handle(api, args, global).await,
        Command::Payments(args) => payments::handle(api, args, global).await,
        Command::Dashboard => dashboard::handle(api, global).await,
        // Handled before a connection is made
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
