//! Storefront client errors.

use std::fmt::{self, Display, Formatter};

use reqwest::StatusCode;
use thiserror::Error;

use crate::session::SessionError;

/// Errors raised by cart, checkout and order operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No usable credential; raised locally before any request is sent.
    #[error("authentication required")]
    AuthenticationRequired,

    /// Client-side checks failed; nothing was sent to the server.
    #[error("validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// The server answered with a non-success status.
    #[error("{message}")]
    RemoteOperationFailed { status: StatusCode, message: String },

    /// The server answered with a success status but an unexpected body.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (connect failure, timeout).
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The credential store could not be read or written.
    #[error("session storage error")]
    Session(#[from] SessionError),
}

impl StoreError {
    /// Status code of a rejected request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RemoteOperationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn invalid(field: Field, message: &'static str) -> Self {
        Self::ValidationFailed(FieldErrors::single(field, message))
    }
}

/// Input field checked before a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Quantity,
    City,
    Street,
    House,
    Cart,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::City => "city",
            Self::Street => "street",
            Self::House => "house",
            Self::Cart => "cart",
        }
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// Field-level validation messages collected in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn single(field: Field, message: &'static str) -> Self {
        Self(vec![FieldError { field, message }])
    }

    pub fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message reported for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{}: {}", error.field.as_str(), error.message)?;
        }

        Ok(())
    }
}
