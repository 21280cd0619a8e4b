use std::io::Write;

use clap::{Args, Subcommand};
use storefront_app::{context::AppContext, domain::carts::models::ProductId};

use crate::{commands::output_error, render};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the current cart
    Show,

    /// Add a product
    Add {
        /// Product ID
        product: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set the quantity of a line; zero or less removes it
    Set {
        /// Product ID
        product: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Add one unit of a product
    Inc {
        /// Product ID
        product: ProductId,
    },

    /// Take one unit of a product away
    Dec {
        /// Product ID
        product: ProductId,
    },

    /// Remove a product line
    Remove {
        /// Product ID
        product: ProductId,
    },

    /// Remove every line
    Clear,
}

pub(crate) async fn run(
    command: CartCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let mut mirror = context.cart_mirror();

    mirror.load().await;

    let result = match command.command {
        CartSubcommand::Show => Ok(mirror.cart()),
        CartSubcommand::Add { product, quantity } => mirror.add(product, quantity).await,
        CartSubcommand::Set { product, quantity } => {
            mirror.update_quantity(product, quantity).await
        }
        CartSubcommand::Inc { product } => mirror.increment(product).await,
        CartSubcommand::Dec { product } => mirror.decrement(product).await,
        CartSubcommand::Remove { product } => mirror.remove(product).await,
        CartSubcommand::Clear => mirror.clear().await,
    };

    let cart = result.map_err(|error| format!("cart update failed: {error}"))?;

    render::write_cart(out, cart).map_err(output_error)
}
