use std::io::Write;

use clap::Args;
use storefront_app::{
    context::AppContext,
    domain::orders::{CheckoutPhase, ShippingForm},
    errors::StoreError,
};

use crate::{commands::output_error, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// City
    #[arg(long, default_value = "")]
    city: String,

    /// Street
    #[arg(long, default_value = "")]
    street: String,

    /// House number
    #[arg(long, default_value = "")]
    house: String,

    /// Apartment number
    #[arg(long)]
    apartment: Option<String>,

    /// Postal code
    #[arg(long)]
    postal_code: Option<String>,

    /// Delivery notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<CheckoutArgs> for ShippingForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            city: args.city,
            street: args.street,
            house: args.house,
            apartment: args.apartment,
            postal_code: args.postal_code,
            notes: args.notes,
        }
    }
}

pub(crate) async fn run(
    args: CheckoutArgs,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    let form = ShippingForm::from(args);
    let mut mirror = context.cart_mirror();
    let mut checkout = context.checkout();

    match checkout.submit(&mut mirror, &form).await {
        Ok(order) => {
            writeln!(out, "order placed").map_err(output_error)?;

            render::write_order(out, &order).map_err(output_error)
        }
        Err(StoreError::ValidationFailed(errors)) => {
            let fields: Vec<String> = errors
                .iter()
                .map(|error| format!("  {}: {}", error.field.as_str(), error.message))
                .collect();

            Err(format!("checkout rejected:\n{}", fields.join("\n")))
        }
        Err(error) => match checkout.phase() {
            CheckoutPhase::Failed(message) => Err(format!("checkout failed: {message}")),
            _ => Err(format!("checkout not submitted: {error}")),
        },
    }
}
