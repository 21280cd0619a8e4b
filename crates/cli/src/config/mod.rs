//! CLI configuration module

pub(crate) mod api;
pub(crate) mod logging;
pub(crate) mod session;
