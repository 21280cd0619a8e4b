//! Session Config

use std::{path::PathBuf, sync::Arc};

use clap::Args;
use storefront_app::session::{FileSessionStore, SessionStore};

/// Where credentials are kept between invocations.
#[derive(Debug, Args)]
pub(crate) struct SessionConfig {
    /// Session file path
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_SESSION_FILE",
        default_value = ".storefront-session.json"
    )]
    pub session_file: PathBuf,
}

impl SessionConfig {
    pub(crate) fn store(&self) -> Arc<dyn SessionStore> {
        Arc::new(FileSessionStore::new(self.session_file.clone()))
    }
}
