//! Budget Ledger Backend
//!
//! Layered architecture:
//! - domain: Core entities, totals and report figures
//! - repository: SQLite data access
//! - store: In-memory ledger and session mirrored to the repositories
//! - commands: Validated entry points called by the app shell

use std::path::PathBuf;
use tokio::sync::Mutex;

pub mod commands;
pub mod config;
pub mod domain;
pub mod repository;
pub mod store;

use config::AppConfig;
use domain::DomainResult;
use repository::{init_db, DbState, EntryRepository, SettingsRepository, UserRepository};
use store::{LedgerStore, SessionHolder};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub db_path: PathBuf,
    pub ledger: Mutex<LedgerStore<EntryRepository>>,
    pub session: Mutex<SessionHolder<UserRepository>>,
    pub settings: SettingsRepository,
}

impl AppState {
    /// Load the ledger once and seed the session from the first user row
    pub async fn open(db_state: DbState) -> Self {
        let conn = db_state.connection();

        let ledger = LedgerStore::open(EntryRepository::new(conn.clone())).await;

        let mut session = SessionHolder::new(UserRepository::new(conn.clone()));
        // check_existing logs its own error; a failed lookup just means nobody is logged in
        let _ = session.check_existing().await;

        Self {
            db_path: db_state.path().to_path_buf(),
            ledger: Mutex::new(ledger),
            session: Mutex::new(session),
            settings: SettingsRepository::new(conn),
            db_state,
        }
    }

    /// Close the database; the state is unusable afterwards
    pub async fn shutdown(&self) {
        self.db_state.close().await;
        log::info!("Database closed");
    }
}

/// Install the rolling logger for `config`
pub fn init_logging(config: &AppConfig) -> Result<(), rolling_logger::LoggerError> {
    rolling_logger::init_logger_with(
        config.log_dir(),
        &config.app_name,
        &config.log_level,
        rolling_logger::RollingOptions::default(),
    )
}

/// Open the database described by `config` and build the app state
pub async fn init_app(config: &AppConfig) -> DomainResult<AppState> {
    config.ensure_dirs()?;
    let db_path = config.db_path();

    match init_db(&db_path).await {
        Ok(db_state) => {
            let _ = rolling_logger::info("DB init success");
            Ok(AppState::open(db_state).await)
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            Err(e)
        }
    }
}
