//! Bearer credential handling.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Opaque bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    value: String,
}

impl BearerToken {
    /// Wrap a raw token, returning `None` when it is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return None;
        }

        Some(Self { value })
    }

    /// Raw token for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl Serialize for BearerToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for BearerToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        Self::new(raw).ok_or_else(|| serde::de::Error::custom("bearer token is blank"))
    }
}
