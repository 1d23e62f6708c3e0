//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod entry_repo;
mod user_repo;
mod settings_repo;

#[cfg(test)]
mod tests;

pub use traits::{CredentialStore, Repository};
pub use db::{init_db, DbState, SharedConnection};
pub use entry_repo::EntryRepository;
pub use user_repo::UserRepository;
pub use settings_repo::SettingsRepository;
