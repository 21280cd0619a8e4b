//! Storefront CLI commands

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use storefront_app::context::AppContext;

use crate::config::{api::ApiConfig, logging::LoggingConfig, session::SessionConfig};

mod admin;
mod cart;
mod checkout;
mod orders;
mod session;

/// Storefront cart and order client
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront cart and order client", long_about = None)]
pub(crate) struct Cli {
    /// REST API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Credential storage settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage stored credentials
    Session(session::SessionCommand),

    /// Inspect and change the cart
    Cart(cart::CartCommand),

    /// Place an order from the cart
    Checkout(checkout::CheckoutArgs),

    /// Review your own orders
    Orders(orders::OrdersCommand),

    /// Manage every order (admin only)
    Admin(admin::AdminCommand),
}

impl Cli {
    /// Load configuration from `.env`, environment and arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(self.api.client_config(), self.session.store())
            .await
            .map_err(|error| format!("failed to start: {error}"))?;

        let mut out = io::stdout().lock();

        match self.command {
            Commands::Session(command) => session::run(command, &context, &mut out).await,
            Commands::Cart(command) => cart::run(command, &context, &mut out).await,
            Commands::Checkout(args) => checkout::run(args, &context, &mut out).await,
            Commands::Orders(command) => orders::run(command, &context, &mut out).await,
            Commands::Admin(command) => admin::run(command, &context, &mut out).await,
        }?;

        out.flush().map_err(output_error)
    }
}

pub(crate) fn output_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}
