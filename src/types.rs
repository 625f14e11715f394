use serde::{Deserialize, Serialize};

/// A stored user record. The id is owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// Any `id` the client sends is ignored; unknown fields are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub name: String,
}
