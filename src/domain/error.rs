//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and wire envelopes.

use thiserror::Error;

use super::{EmailAddress, UserId};

/// Failures raised by the user registry and its store port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// The referenced id has no live user.
    #[error("no user with id {id}")]
    NotFound { id: UserId },
    /// Another live user already owns this email address.
    #[error("email {email} is already in use")]
    EmailInUse { email: EmailAddress },
    /// A caller-supplied id collides with a live user.
    #[error("user id {id} is already taken")]
    IdInUse { id: UserId },
}

impl UserStoreError {
    /// Helper for missing users.
    #[must_use]
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }

    /// Helper for email uniqueness violations.
    #[must_use]
    pub fn email_in_use(email: EmailAddress) -> Self {
        Self::EmailInUse { email }
    }

    /// Helper for id collisions on explicit-id creation.
    #[must_use]
    pub fn id_in_use(id: UserId) -> Self {
        Self::IdInUse { id }
    }

    /// True for both conflict variants.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailInUse { .. } | Self::IdInUse { .. })
    }
}
