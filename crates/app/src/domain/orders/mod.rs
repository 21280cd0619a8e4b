//! Orders

mod buyer;
mod checkout;
mod console;
mod gateway;
pub mod models;
mod status;

pub use buyer::BuyerOrders;
pub use checkout::{CheckoutOrchestrator, CheckoutPhase, ShippingForm};
pub use console::{AdminOrderConsole, OrderSummary};
pub use gateway::*;
pub use status::{OrderStatus, StatusFilter, UnknownStatus};
