//! User Entity
//!
//! INSECURE, parity only: credentials are kept and compared as plain text,
//! exactly like the app this library backs. A production build must move to
//! salted hashing, which changes the `user` row shape.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// The authenticated identity held by the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

impl Entity for User {
    type Id = i64;
    type Draft = PlaintextCredentials;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Email and password exactly as typed. Not hashed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct PlaintextCredentials {
    pub email: String,
    pub password: String,
}

impl PlaintextCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Keep passwords out of logs
impl std::fmt::Debug for PlaintextCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaintextCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
