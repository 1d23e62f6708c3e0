//! User Repository
//!
//! INSECURE, parity only. Passwords are stored in the `password` column as
//! typed and matched with SQL equality. Do not ship this table shape to
//! production; it needs salted hashes instead.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};

use crate::domain::{DomainError, DomainResult, PlaintextCredentials, User};
use super::db::SharedConnection;
use super::traits::CredentialStore;

pub struct UserRepository {
    conn: SharedConnection,
}

impl UserRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn first_user(&self) -> DomainResult<Option<User>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let user = conn
            .query_row(
                "SELECT id, email FROM user ORDER BY id LIMIT 1",
                [],
                |row| {
                    let email: Option<String> = row.get(1)?;
                    Ok(User::new(row.get(0)?, email.unwrap_or_default()))
                },
            )
            .optional()?;
        Ok(user)
    }

    async fn find_by_credentials(&self, credentials: &PlaintextCredentials) -> DomainResult<Option<User>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let user = conn
            .query_row(
                "SELECT id, email FROM user WHERE email = ?1 AND password = ?2 ORDER BY id LIMIT 1",
                params![credentials.email, credentials.password],
                |row| Ok(User::new(row.get(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(user)
    }

    async fn insert(&self, credentials: &PlaintextCredentials) -> DomainResult<User> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        conn.execute(
            "INSERT INTO user (email, password) VALUES (?1, ?2)",
            params![credentials.email, credentials.password],
        )?;

        Ok(User::new(conn.last_insert_rowid(), credentials.email.clone()))
    }
}
