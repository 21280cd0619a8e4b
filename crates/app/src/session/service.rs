//! Session service.

use std::{fmt, sync::Arc};

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::session::{
    BearerToken, Credentials, Identity, MemorySessionStore, SessionError, SessionStore,
};

/// Current credentials for this client, backed by a [`SessionStore`].
///
/// Clones share state, so every gateway holding a clone observes
/// [`Session::invalidate`] immediately.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Credentials>>>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Unauthenticated session kept only in memory.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Replace in-memory credentials with whatever the store holds.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    pub async fn load(&self) -> Result<Option<Identity>, SessionError> {
        let stored = self.store.load().await?;
        let identity = stored.as_ref().map(|credentials| credentials.identity.clone());

        *self.current.write().await = stored;

        Ok(identity)
    }

    /// Store new credentials and make them current.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written; the in-memory state
    /// is left unchanged in that case.
    pub async fn persist(&self, credentials: Credentials) -> Result<(), SessionError> {
        self.store.persist(&credentials).await?;

        info!(user = %credentials.identity.username, "session started");

        *self.current.write().await = Some(credentials);

        Ok(())
    }

    /// Forget credentials both in memory and in the store.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be cleared. In-memory
    /// credentials are dropped regardless.
    pub async fn clear(&self) -> Result<(), SessionError> {
        *self.current.write().await = None;

        self.store.clear().await
    }

    /// Drop credentials after the server rejected them.
    pub async fn invalidate(&self) {
        warn!("credential rejected by server, clearing session");

        if let Err(error) = self.clear().await {
            warn!("failed to clear stored session: {error}");
        }
    }

    pub async fn credential(&self) -> Option<BearerToken> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|credentials| credentials.token.clone())
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|credentials| credentials.identity.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
