//! Budget Settings Repository
//!
//! Single-row persistence of the weekly budget limit.

use rusqlite::{params, OptionalExtension};

use crate::domain::{Amount, BudgetSettings, DomainError, DomainResult};
use super::db::SharedConnection;

pub struct SettingsRepository {
    conn: SharedConnection,
}

impl SettingsRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn save(&self, settings: &BudgetSettings) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        conn.execute(
            "INSERT OR REPLACE INTO budget_settings (id, weekly_budget) VALUES (1, ?1)",
            params![settings.weekly_budget.map(|a| a.cents())],
        )?;

        Ok(())
    }

    /// Stored settings, or defaults when nothing was saved yet
    pub async fn load(&self) -> DomainResult<BudgetSettings> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let weekly_budget: Option<Option<i64>> = conn
            .query_row(
                "SELECT weekly_budget FROM budget_settings WHERE id = 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(BudgetSettings {
            weekly_budget: weekly_budget.flatten().map(Amount::from_cents),
        })
    }
}
