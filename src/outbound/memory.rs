//! In-memory store adapter.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::{
    NewUser, User, UserId, UserPatch, UserRegistry, UserStore, UserStoreError,
};

/// [`UserStore`] adapter wrapping a [`UserRegistry`] in a process-local lock.
///
/// The registry itself is single-threaded. Holding the write guard across
/// a whole operation makes the create-time uniqueness check and the insert
/// that follows atomic under concurrent HTTP handlers.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    registry: RwLock<UserRegistry>,
}

impl InMemoryUserStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Registry operations never panic while holding the guard, but a
    // poisoned lock still yields a usable registry.
    fn read(&self) -> RwLockReadGuard<'_, UserRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserRegistry> {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, input: NewUser) -> Result<User, UserStoreError> {
        self.write().create(input)
    }

    async fn list(&self) -> Vec<User> {
        self.read().list()
    }

    async fn get(&self, id: UserId) -> Result<User, UserStoreError> {
        self.read().get(id).cloned()
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError> {
        self.write().update(id, patch)
    }

    async fn remove(&self, id: UserId) -> Result<(), UserStoreError> {
        self.write().remove(id)
    }

    async fn clear(&self) {
        self.write().clear();
    }
}
