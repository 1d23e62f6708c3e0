//! Commands Layer
//!
//! Entry points the app shell calls. Each takes the shared `AppState`,
//! validates raw input and returns a user-facing message on failure.

mod auth_cmd;
mod entry_cmd;
mod report_cmd;

pub use auth_cmd::*;
pub use entry_cmd::*;
pub use report_cmd::*;

#[cfg(test)]
pub(crate) async fn test_state() -> crate::AppState {
    let db = crate::repository::init_db(std::path::Path::new(":memory:"))
        .await
        .expect("Failed to init test DB");
    crate::AppState::open(db).await
}
