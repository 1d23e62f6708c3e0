//! Session Holder
//!
//! At most one authenticated user, held in memory. Seeded from the first
//! user row at startup; no tokens, no expiry.

use crate::domain::{DomainError, DomainResult, PlaintextCredentials, User};
use crate::repository::CredentialStore;

pub struct SessionHolder<C: CredentialStore> {
    users: C,
    current: Option<User>,
}

impl<C: CredentialStore> SessionHolder<C> {
    pub fn new(users: C) -> Self {
        Self {
            users,
            current: None,
        }
    }

    /// Adopt the first stored user as the session, if there is one
    pub async fn check_existing(&mut self) -> DomainResult<Option<User>> {
        let user = self.users.first_user().await.map_err(|e| {
            log::error!("Error checking user: {}", e);
            e
        })?;

        if let Some(user) = &user {
            self.current = Some(user.clone());
        }
        Ok(user)
    }

    /// Exact plain-text match; a miss leaves the session untouched
    pub async fn login(&mut self, credentials: &PlaintextCredentials) -> DomainResult<User> {
        let user = self
            .users
            .find_by_credentials(credentials)
            .await?
            .ok_or(DomainError::AuthFailed)?;

        log::info!("User {} logged in", user.id);
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Create a user row; the session is not changed
    pub async fn signup(&mut self, credentials: &PlaintextCredentials) -> DomainResult<User> {
        let user = self.users.insert(credentials).await?;
        log::info!("User {} signed up", user.id);
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            log::info!("User {} logged out", user.id);
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{init_db, DbState, UserRepository};
    use std::path::Path;

    async fn setup() -> (DbState, SessionHolder<UserRepository>) {
        let db = init_db(Path::new(":memory:")).await.unwrap();
        let session = SessionHolder::new(UserRepository::new(db.connection()));
        (db, session)
    }

    #[tokio::test]
    async fn test_login_unknown_credentials_fails() {
        let (_db, mut session) = setup().await;
        let creds = PlaintextCredentials::new("nobody@example.com", "nope");

        assert_eq!(session.login(&creds).await.unwrap_err(), DomainError::AuthFailed);
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_signup_does_not_log_in() {
        let (_db, mut session) = setup().await;
        let creds = PlaintextCredentials::new("ana@example.com", "secret");

        let user = session.signup(&creds).await.unwrap();
        assert!(!session.is_logged_in());

        let logged = session.login(&creds).await.unwrap();
        assert_eq!(logged, user);
        assert_eq!(session.current(), Some(&user));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let (_db, mut session) = setup().await;
        let creds = PlaintextCredentials::new("ana@example.com", "secret");
        session.signup(&creds).await.unwrap();
        let user = session.login(&creds).await.unwrap();

        let wrong = PlaintextCredentials::new("ana@example.com", "guess");
        assert!(session.login(&wrong).await.is_err());
        assert_eq!(session.current(), Some(&user));
    }

    #[tokio::test]
    async fn test_logout_clears() {
        let (_db, mut session) = setup().await;
        let creds = PlaintextCredentials::new("ana@example.com", "secret");
        session.signup(&creds).await.unwrap();
        session.login(&creds).await.unwrap();

        session.logout();
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_check_existing_picks_first_row() {
        let (db, mut session) = setup().await;
        assert_eq!(session.check_existing().await.unwrap(), None);
        assert!(!session.is_logged_in());

        let users = UserRepository::new(db.connection());
        let first = users.insert(&PlaintextCredentials::new("first@example.com", "a")).await.unwrap();
        users.insert(&PlaintextCredentials::new("second@example.com", "b")).await.unwrap();

        assert_eq!(session.check_existing().await.unwrap(), Some(first.clone()));
        assert_eq!(session.current(), Some(&first));
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_auth_failure() {
        let (db, mut session) = setup().await;
        db.close().await;

        let err = session
            .login(&PlaintextCredentials::new("ana@example.com", "secret"))
            .await
            .unwrap_err();
        assert!(err.is_storage());
    }
}
