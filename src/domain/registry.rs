//! The user-collection invariant engine.
//!
//! [`UserRegistry`] is the sole owner of the user collection. All reads and
//! writes go through its operations; there is no other handle to the data.
//! Callers that need a clean slate between test cases use [`UserRegistry::clear`]
//! rather than reaching into internal state.

use std::collections::HashMap;

use super::{EmailAddress, NewUser, User, UserId, UserPatch, UserStoreError};

/// In-memory user collection with identity assignment and uniqueness
/// enforcement.
///
/// ## Invariants
/// - Exactly one live user per id.
/// - No two live users share an email address (exact string equality).
/// - `next_id` only moves forward, so assigned ids are never reused even
///   after deletions.
#[derive(Debug)]
pub struct UserRegistry {
    users: HashMap<UserId, User>,
    /// Insertion order of live users; tracks the key set of `users`.
    order: Vec<UserId>,
    /// Next id to assign. Monotonic for the lifetime of the registry.
    next_id: u64,
}

impl UserRegistry {
    /// Empty registry; the first assigned id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a user, enforcing email uniqueness and, for explicit ids, the
    /// one-live-user-per-id invariant.
    ///
    /// When `input.id` is `None` the next counter value is assigned. An
    /// explicit id at or above the counter bumps the counter past it so a
    /// later assignment can never collide with it.
    pub fn create(&mut self, input: NewUser) -> Result<User, UserStoreError> {
        if self.find_by_email(&input.email).is_some() {
            return Err(UserStoreError::email_in_use(input.email));
        }

        let id = match input.id {
            Some(id) => {
                if self.users.contains_key(&id) {
                    return Err(UserStoreError::id_in_use(id));
                }
                self.next_id = self.next_id.max(id.get().saturating_add(1));
                id
            }
            None => {
                let id = UserId::new(self.next_id);
                self.next_id += 1;
                id
            }
        };

        let user = User::new(id, input.name, input.email);
        self.order.push(id);
        self.users.insert(id, user.clone());
        Ok(user)
    }

    /// Snapshot of all live users in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.order
            .iter()
            .filter_map(|id| self.users.get(id))
            .cloned()
            .collect()
    }

    /// Look up a live user by id.
    pub fn get(&self, id: UserId) -> Result<&User, UserStoreError> {
        self.users.get(&id).ok_or(UserStoreError::NotFound { id })
    }

    /// Merge `patch` into the user with `id`. Unset fields are untouched;
    /// an empty patch succeeds without changing anything.
    ///
    /// Changing the email to one held by another live user is rejected.
    /// Re-submitting the user's own current email is allowed.
    pub fn update(&mut self, id: UserId, patch: UserPatch) -> Result<User, UserStoreError> {
        let current = self.users.get(&id).ok_or(UserStoreError::NotFound { id })?;

        if let Some(email) = &patch.email {
            if let Some(existing) = self.find_by_email(email) {
                if existing.id() != id {
                    return Err(UserStoreError::email_in_use(email.clone()));
                }
            }
        }

        let name = patch.name.unwrap_or_else(|| current.name().clone());
        let email = patch.email.unwrap_or_else(|| current.email().clone());
        let updated = User::new(id, name, email);
        self.users.insert(id, updated.clone());
        Ok(updated)
    }

    /// Remove the user with `id`. A second call for the same id fails
    /// cleanly with not-found; the id is never assigned again.
    pub fn remove(&mut self, id: UserId) -> Result<(), UserStoreError> {
        if self.users.remove(&id).is_none() {
            return Err(UserStoreError::NotFound { id });
        }
        self.order.retain(|live| *live != id);
        Ok(())
    }

    /// Drop every live user and reset the id counter.
    pub fn clear(&mut self) {
        self.users.clear();
        self.order.clear();
        self.next_id = 1;
    }

    /// Number of live users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no users are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn find_by_email(&self, email: &EmailAddress) -> Option<&User> {
        self.order
            .iter()
            .filter_map(|id| self.users.get(id))
            .find(|user| user.email() == email)
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
