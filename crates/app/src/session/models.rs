//! Session models.

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, session::BearerToken};

/// User identifier
pub type UserId = TypedId<Identity>;

/// Role granted to the signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER", alias = "USER")]
    User,

    #[serde(rename = "ROLE_ADMIN", alias = "ADMIN")]
    Admin,
}

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Persisted credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: BearerToken,
    pub identity: Identity,
}
