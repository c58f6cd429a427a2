//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in
//! its own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::GatehouseError;

pub async fn dispatch(cli: Cli) -> Result<(), GatehouseError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  gatehouse v{version} \u{2014} forwarding proxy for a private HTTP origin\n\n  \
         No command provided. To get started:\n\n    \
         gatehouse run                                 Forward to http://localhost:8080\n    \
         gatehouse run --origin https://api.internal   Forward to a specific origin\n    \
         gatehouse health                              Check a running instance\n    \
         gatehouse --help                              See all commands and options\n"
    );
}
