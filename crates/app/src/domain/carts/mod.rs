//! Carts

mod gateway;
mod mirror;
pub mod models;

pub use gateway::*;
pub use mirror::CartMirror;
