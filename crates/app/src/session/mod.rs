//! Session and identity

mod errors;
mod models;
mod service;
mod store;
mod token;

pub use errors::SessionError;
pub use models::*;
pub use service::Session;
pub use store::*;
pub use token::BearerToken;
