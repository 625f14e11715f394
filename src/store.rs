//! In-memory user record store.
//!
//! A single lock guards both the id cursor and the map, so id assignment and
//! insertion are atomic with respect to each other. Reads clone records out of
//! the map and never observe a half-written entry.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::User;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(u64),
}

struct Inner {
    users: HashMap<u64, User>,
    /// Next id to hand out. Always greater than every id ever assigned.
    next_id: u64,
}

/// Cloneable handle to the shared record store.
#[derive(Clone)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner { users: HashMap::new(), next_id: 1 })),
        }
    }

    /// Stores a new user under the next sequence id and returns it.
    pub fn create(&self, name: impl Into<String>) -> User {
        let mut inner = self.inner.write();
        let user = User { id: inner.next_id, name: name.into() };
        inner.users.insert(user.id, user.clone());
        inner.next_id += 1;
        user
    }

    pub fn get(&self, id: u64) -> Option<User> {
        self.inner.read().users.get(&id).cloned()
    }

    /// Snapshot of all records, keyed by id.
    pub fn get_all(&self) -> BTreeMap<u64, User> {
        self.inner.read().users.iter().map(|(id, u)| (*id, u.clone())).collect()
    }

    /// Replaces the name of an existing user. The id never changes.
    pub fn update(&self, id: u64, name: impl Into<String>) -> Result<User, StoreError> {
        let mut inner = self.inner.write();
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        user.name = name.into();
        Ok(user.clone())
    }

    /// Removes a user if present. Deleting an absent id is not an error.
    pub fn delete(&self, id: u64) -> Option<User> {
        self.inner.write().users.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
