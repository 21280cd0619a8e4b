use std::io::Write;

use clap::{Args, Subcommand};
use storefront_app::{context::AppContext, domain::orders::models::OrderId};

use crate::{commands::output_error, render};

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders, newest first
    List,

    /// Show one order
    Show {
        /// Order ID
        order: OrderId,
    },

    /// Cancel a pending or confirmed order
    Cancel {
        /// Order ID
        order: OrderId,
    },
}

pub(crate) async fn run(
    command: OrdersCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let orders = context.buyer_orders();

    match command.command {
        OrdersSubcommand::List => {
            let list = orders
                .list()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            render::write_orders(out, &list).map_err(output_error)
        }
        OrdersSubcommand::Show { order } => {
            let order = orders
                .get(order)
                .await
                .map_err(|error| format!("failed to load order {order}: {error}"))?;

            render::write_order(out, &order).map_err(output_error)
        }
        OrdersSubcommand::Cancel { order } => {
            let cancelled = orders
                .cancel(order)
                .await
                .map_err(|error| format!("failed to cancel order {order}: {error}"))?;

            render::write_order(out, &cancelled).map_err(output_error)
        }
    }
}
