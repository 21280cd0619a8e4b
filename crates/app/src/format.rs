//! Display formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// Currency every storefront price is quoted in.
pub const CURRENCY: &Currency = iso::BYN;

/// Amount as storefront money, rounded to whole minor units with halves
/// going away from zero.
#[must_use]
pub fn price(amount: Decimal) -> Money<'static, Currency> {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, CURRENCY)
}

/// Format an amount the way the storefront shows prices.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    price(amount).to_string()
}
