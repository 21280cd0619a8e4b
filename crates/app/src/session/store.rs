//! Credential storage backends.

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use mockall::automock;
use tokio::{fs, sync::Mutex};

use crate::session::{Credentials, SessionError};

/// File-backed credential storage, one JSON document per session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Credentials>, SessionError> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_slice(&contents)?))
    }

    async fn persist(&self, credentials: &Credentials) -> Result<(), SessionError> {
        let contents = serde_json::to_vec_pretty(credentials)?;

        fs::write(&self.path, contents).await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// In-process credential storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credentials: Mutex<Option<Credentials>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Credentials>, SessionError> {
        Ok(self.credentials.lock().await.clone())
    }

    async fn persist(&self, credentials: &Credentials) -> Result<(), SessionError> {
        *self.credentials.lock().await = Some(credentials.clone());

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.credentials.lock().await = None;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read stored credentials, `None` when nothing is stored.
    async fn load(&self) -> Result<Option<Credentials>, SessionError>;

    /// Replace stored credentials.
    async fn persist(&self, credentials: &Credentials) -> Result<(), SessionError>;

    /// Remove stored credentials. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::session::{BearerToken, Identity, Role, UserId};

    use super::*;

    fn credentials() -> TestResult<Credentials> {
        Ok(Credentials {
            token: BearerToken::new("token-1").ok_or("blank token")?,
            identity: Identity {
                id: UserId::new(3),
                username: "john_doe".to_string(),
                role: Role::User,
            },
        })
    }

    #[tokio::test]
    async fn file_store_round_trips_credentials() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));
        let credentials = credentials()?;

        assert_eq!(store.load().await?, None);

        store.persist(&credentials).await?;

        assert_eq!(store.load().await?, Some(credentials));

        Ok(())
    }

    #[tokio::test]
    async fn file_store_clear_is_idempotent() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.persist(&credentials()?).await?;
        store.clear().await?;
        store.clear().await?;

        assert_eq!(store.load().await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn file_store_rejects_corrupt_contents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        std::fs::write(&path, b"{not json")?;

        let result = FileSessionStore::new(path).load().await;

        assert!(
            matches!(result, Err(SessionError::Format(_))),
            "expected Format error, got {result:?}"
        );

        Ok(())
    }
}
