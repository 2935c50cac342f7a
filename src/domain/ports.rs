//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

use async_trait::async_trait;

use super::{NewUser, User, UserId, UserPatch, UserStoreError};

/// Store port over the authoritative user collection.
///
/// Implementations own the collection and serialise access to it: the
/// uniqueness check inside [`UserStore::create`] and the insert that
/// follows must be atomic with respect to concurrent callers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Add a user; see [`crate::domain::UserRegistry::create`].
    async fn create(&self, input: NewUser) -> Result<User, UserStoreError>;

    /// Snapshot of all live users in insertion order.
    async fn list(&self) -> Vec<User>;

    /// Look up a live user by id.
    async fn get(&self, id: UserId) -> Result<User, UserStoreError>;

    /// Merge a partial update into a live user.
    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError>;

    /// Remove a live user.
    async fn remove(&self, id: UserId) -> Result<(), UserStoreError>;

    /// Drop every live user and reset identity assignment.
    async fn clear(&self);
}
