//! Storefront cart and order CLI

use std::process::ExitCode;

use tracing::debug;

use crate::commands::Cli;

mod commands;
mod config;
mod observability;
mod render;

/// Storefront CLI entry point
#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(source) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{source}");
        }

        return ExitCode::FAILURE;
    }

    debug!(api_url = %cli.api.api_url, "starting storefront client");

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            #[expect(clippy::print_stderr, reason = "command failures are reported to the user")]
            {
                eprintln!("{message}");
            }

            ExitCode::FAILURE
        }
    }
}
