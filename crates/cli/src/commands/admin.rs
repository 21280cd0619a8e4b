use std::io::Write;

use clap::{Args, Subcommand};
use storefront_app::{
    context::AppContext,
    domain::orders::{OrderStatus, StatusFilter, models::OrderId},
};

use crate::{commands::output_error, render};

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// List every order
    List {
        /// Status to show, or "all"
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },

    /// Move an order to another status
    SetStatus {
        /// Order ID
        order: OrderId,

        /// Target status
        status: OrderStatus,

        /// Status filter for the refreshed listing, or "all"
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
    },

    /// Order counts per status and revenue
    Summary,
}

pub(crate) async fn run(
    command: AdminCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut console = context.admin_console();

    match command.command {
        AdminSubcommand::List { status } => {
            console.set_filter(status);

            let visible = console
                .refresh()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            render::write_orders(out, visible).map_err(output_error)
        }
        AdminSubcommand::SetStatus {
            order,
            status,
            filter,
        } => {
            console.set_filter(filter);

            let result = console.change_status(order, status).await;

            render::write_orders(out, console.visible()).map_err(output_error)?;

            match result {
                Ok(updated) => writeln!(
                    out,
                    "order #{} is now {}",
                    updated.id,
                    updated.status.label()
                )
                .map_err(output_error),
                Err(error) => match console.displayed_status(order) {
                    Some(shown) => Err(format!(
                        "status change rejected: {error} (order #{order} remains {}, next: {})",
                        shown.label(),
                        render::next_statuses(shown)
                    )),
                    None => Err(format!("status change rejected: {error}")),
                },
            }
        }
        AdminSubcommand::Summary => {
            console
                .refresh()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            render::write_summary(out, &console.summary()).map_err(output_error)
        }
    }
}
