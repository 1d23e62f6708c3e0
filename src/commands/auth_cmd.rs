//! Auth Commands
//!
//! Login, signup and logout over the session holder.
//! Credentials are plain text end to end (see `domain::user`).

use crate::domain::{DomainError, PlaintextCredentials, User};
use crate::AppState;

pub const LOGIN_FIELDS_REQUIRED: &str = "Please enter both email and password.";
pub const LOGIN_INVALID: &str = "Invalid email or password.";
pub const LOGIN_FAILED: &str = "An error occurred during login. Please try again.";
pub const SIGNUP_FIELDS_REQUIRED: &str = "Please fill in all fields.";
pub const SIGNUP_PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const SIGNUP_FAILED: &str = "Could not create account. Please try again.";

pub async fn login(state: &AppState, email: String, password: String) -> Result<User, String> {
    if email.is_empty() || password.is_empty() {
        return Err(LOGIN_FIELDS_REQUIRED.to_string());
    }

    let credentials = PlaintextCredentials::new(email, password);
    let mut session = state.session.lock().await;
    session.login(&credentials).await.map_err(|e| match e {
        DomainError::AuthFailed => LOGIN_INVALID.to_string(),
        other => {
            log::error!("Login error: {}", other);
            LOGIN_FAILED.to_string()
        }
    })
}

/// Create an account; the caller still has to log in
pub async fn signup(
    state: &AppState,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<User, String> {
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(SIGNUP_FIELDS_REQUIRED.to_string());
    }
    if password != confirm_password {
        return Err(SIGNUP_PASSWORD_MISMATCH.to_string());
    }

    let credentials = PlaintextCredentials::new(email, password);
    let mut session = state.session.lock().await;
    session.signup(&credentials).await.map_err(|e| {
        log::error!("Signup failed: {}", e);
        SIGNUP_FAILED.to_string()
    })
}

pub async fn logout(state: &AppState) {
    state.session.lock().await.logout();
}

pub async fn current_user(state: &AppState) -> Option<User> {
    state.session.lock().await.current().cloned()
}
