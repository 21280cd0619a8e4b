//! Storefront cart and order consistency core.

pub mod api;
pub mod context;
pub mod domain;
pub mod errors;
pub mod format;
pub mod ids;
pub mod session;

#[cfg(test)]
mod test;
