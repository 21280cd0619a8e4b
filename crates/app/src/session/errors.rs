//! Session errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid")]
    Format(#[from] serde_json::Error),
}
