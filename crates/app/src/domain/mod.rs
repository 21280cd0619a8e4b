//! Storefront Domain Concerns

pub mod carts;
pub mod orders;
