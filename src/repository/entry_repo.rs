//! Entry Repository
//!
//! SQLite-backed implementation of Repository<BudgetEntry> over the
//! `transactions` table.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{
    format_entry_date, parse_entry_date, stored_entry_date, Amount, BudgetEntry, DomainError,
    DomainResult, EntryType, NewEntry,
};
use super::db::SharedConnection;
use super::traits::Repository;

const SELECT_COLUMNS: &str = "SELECT id, amount, category, description, date, type FROM transactions";

/// SQLite implementation of the entry repository
pub struct EntryRepository {
    conn: SharedConnection,
}

impl EntryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

/// Raw column values; columns are nullable in the table definition
struct EntryRow {
    id: i64,
    amount: Option<i64>,
    category: Option<String>,
    description: Option<String>,
    date: Option<String>,
    entry_type: Option<String>,
}

impl EntryRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            amount: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
            date: row.get(4)?,
            entry_type: row.get(5)?,
        })
    }

    fn into_entry(self) -> DomainResult<BudgetEntry> {
        let date = self
            .date
            .ok_or_else(|| DomainError::Storage(format!("entry {} has no date", self.id)))?;
        let entry_type = self
            .entry_type
            .ok_or_else(|| DomainError::Storage(format!("entry {} has no type", self.id)))?;
        let entry_type = EntryType::parse(&entry_type)
            .map_err(|e| DomainError::Storage(format!("entry {}: {}", self.id, e)))?;

        Ok(BudgetEntry {
            id: self.id,
            amount: Amount::from_cents(self.amount.unwrap_or(0)),
            category: self.category.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            date: parse_entry_date(&date)?,
            entry_type,
        })
    }
}

#[async_trait]
impl Repository<BudgetEntry> for EntryRepository {
    async fn create(&self, draft: &NewEntry) -> DomainResult<BudgetEntry> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        conn.execute(
            "INSERT INTO transactions (amount, category, description, date, type) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.amount.cents(),
                draft.category,
                draft.description,
                format_entry_date(&draft.date),
                draft.entry_type.as_str(),
            ],
        )?;

        // Returned record mirrors the row as stored
        let id = conn.last_insert_rowid();
        let mut entry = BudgetEntry::from_new(id, draft.clone());
        entry.date = stored_entry_date(entry.date);
        Ok(entry)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<BudgetEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let row = conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], EntryRow::read)
            .optional()?;

        row.map(EntryRow::into_entry).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<BudgetEntry>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], EntryRow::read)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    async fn update(&self, entity: &BudgetEntry) -> DomainResult<BudgetEntry> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let changed = conn.execute(
            "UPDATE transactions SET amount = ?1, category = ?2, description = ?3, date = ?4, type = ?5 WHERE id = ?6",
            params![
                entity.amount.cents(),
                entity.category,
                entity.description,
                format_entry_date(&entity.date),
                entity.entry_type.as_str(),
                entity.id,
            ],
        )?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("entry {}", entity.id)));
        }
        Ok(BudgetEntry {
            date: stored_entry_date(entity.date),
            ..entity.clone()
        })
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or(DomainError::NotInitialized)?;

        let changed = conn.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("entry {}", id)));
        }
        Ok(())
    }
}
