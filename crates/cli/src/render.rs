//! Terminal rendering for carts and orders.

use std::io;

use storefront_app::{
    domain::{
        carts::models::Cart,
        orders::{OrderStatus, OrderSummary, models::Order},
    },
    format::format_price,
    session::Identity,
};
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

fn styled(builder: Builder, numeric: &[usize]) -> Table {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    for &column in numeric {
        table.modify(Columns::new(column..=column), Alignment::right());
    }

    table
}

pub(crate) fn write_cart(out: &mut impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Price", "Qty", "Subtotal"]);

    for item in &cart.items {
        builder.push_record([
            item.product_id.to_string(),
            item.product_name.clone(),
            format_price(item.unit_price),
            item.quantity.to_string(),
            format_price(item.subtotal()),
        ]);
    }

    writeln!(out, "{}", styled(builder, &[2, 3, 4]))?;
    writeln!(
        out,
        "items: {}  total: {}",
        cart.count(),
        format_price(cart.total())
    )
}

pub(crate) fn write_orders<'a>(
    out: &mut impl io::Write,
    orders: impl IntoIterator<Item = &'a Order>,
) -> io::Result<()> {
    let mut builder = Builder::default();
    let mut rows = 0_usize;

    builder.push_record(["Order", "Placed", "Customer", "Status", "Total", "Address"]);

    for order in orders {
        builder.push_record([
            format!("#{}", order.id),
            order.created_at.strftime(DATE_FORMAT).to_string(),
            order
                .owner_name
                .clone()
                .unwrap_or_else(|| format!("user {}", order.owner_id)),
            order.status.label().to_string(),
            format_price(order.total_amount),
            order.shipping_address.clone(),
        ]);

        rows += 1;
    }

    if rows == 0 {
        return writeln!(out, "no orders found");
    }

    writeln!(out, "{}", styled(builder, &[4]))
}

/// Statuses reachable from `status`, by wire name.
pub(crate) fn next_statuses(status: OrderStatus) -> String {
    if status.is_terminal() {
        return "none, status is final".to_string();
    }

    status
        .next_states()
        .into_iter()
        .map(OrderStatus::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn write_order(out: &mut impl io::Write, order: &Order) -> io::Result<()> {
    writeln!(out, "order:    #{}", order.id)?;
    writeln!(out, "placed:   {}", order.created_at.strftime(DATE_FORMAT))?;

    if order.status.is_cancellable() {
        writeln!(out, "status:   {} (can be cancelled)", order.status.label())?;
    } else {
        writeln!(out, "status:   {}", order.status.label())?;
    }

    writeln!(out, "address:  {}", order.shipping_address)?;

    if let Some(notes) = &order.notes {
        writeln!(out, "notes:    {notes}")?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Price", "Qty", "Subtotal"]);

    for item in &order.items {
        builder.push_record([
            item.product_id.to_string(),
            item.product_name.clone(),
            format_price(item.unit_price),
            item.quantity.to_string(),
            format_price(item.subtotal()),
        ]);
    }

    writeln!(out, "{}", styled(builder, &[2, 3, 4]))?;
    writeln!(out, "total:    {}", format_price(order.total_amount))
}

pub(crate) fn write_summary(out: &mut impl io::Write, summary: &OrderSummary) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Status", "Orders"]);

    for status in OrderStatus::ALL {
        builder.push_record([status.label().to_string(), summary.count(status).to_string()]);
    }

    writeln!(out, "{}", styled(builder, &[1]))?;
    writeln!(out, "orders:   {}", summary.total_orders)?;
    writeln!(out, "revenue:  {}", format_price(summary.revenue))
}

pub(crate) fn write_identity(out: &mut impl io::Write, identity: Option<&Identity>) -> io::Result<()> {
    match identity {
        Some(identity) => writeln!(
            out,
            "signed in as {} (id {}, {})",
            identity.username,
            identity.id,
            if identity.is_admin() { "admin" } else { "buyer" }
        ),
        None => writeln!(out, "not signed in"),
    }
}
