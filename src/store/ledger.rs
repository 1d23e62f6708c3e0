//! Ledger Store
//!
//! The entry collection held in memory, mirrored to a repository.
//! The collection is read once at open; afterwards every mutation writes the
//! row first and only touches memory once the write succeeded, so the two
//! never disagree after a failed write.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, BudgetEntry, DomainError, DomainResult, NewEntry, Totals};
use crate::repository::Repository;

/// Outcome of update/delete when no storage error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    Applied,
    /// No entry has the given id; nothing was touched
    NoMatch,
}

pub struct LedgerStore<R: Repository<BudgetEntry>> {
    repo: R,
    entries: Vec<BudgetEntry>,
}

impl<R: Repository<BudgetEntry>> LedgerStore<R> {
    /// Construct and load once; a failed read leaves the ledger empty
    pub async fn open(repo: R) -> Self {
        let mut store = Self {
            repo,
            entries: Vec::new(),
        };
        if let Err(e) = store.load().await {
            log::error!("Error loading entries: {}", e);
        }
        store
    }

    /// Re-read every persisted entry into memory
    pub async fn load(&mut self) -> DomainResult<&[BudgetEntry]> {
        match self.repo.list().await {
            Ok(entries) => {
                log::debug!("Loaded {} entries", entries.len());
                self.entries = entries;
                Ok(self.entries.as_slice())
            }
            Err(e) => {
                log::error!("Failed to load entries: {}", e);
                self.entries.clear();
                Err(e)
            }
        }
    }

    pub async fn add(&mut self, entry: NewEntry) -> DomainResult<BudgetEntry> {
        let created = self.repo.create(&entry).await.map_err(|e| {
            log::error!("Failed to save entry: {}", e);
            e
        })?;

        self.entries.push(created.clone());
        Ok(created)
    }

    /// Full replace by id
    pub async fn update(&mut self, entry: BudgetEntry) -> DomainResult<Change> {
        let Some(index) = self.position(entry.id) else {
            return Ok(Change::NoMatch);
        };

        let saved = self.repo.update(&entry).await.map_err(|e| {
            log::error!("Failed to update entry {}: {}", entry.id, e);
            mirror_error(e)
        })?;

        self.entries[index] = saved;
        Ok(Change::Applied)
    }

    pub async fn delete(&mut self, id: i64) -> DomainResult<Change> {
        if self.position(id).is_none() {
            return Ok(Change::NoMatch);
        }

        self.repo.delete(id).await.map_err(|e| {
            log::error!("Failed to delete entry {}: {}", id, e);
            mirror_error(e)
        })?;

        self.entries.retain(|entry| entry.id != id);
        Ok(Change::Applied)
    }

    pub fn entries(&self) -> &[BudgetEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&BudgetEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recomputed from the whole collection on every call
    pub fn totals(&self) -> Totals {
        Totals::from_entries(&self.entries)
    }

    pub fn total_income(&self) -> Amount {
        self.totals().income
    }

    pub fn total_expenses(&self) -> Amount {
        self.totals().expenses
    }

    pub fn balance(&self) -> Amount {
        self.totals().balance
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }
}

// Memory says the row exists; a NotFound from the backend means the mirror drifted
fn mirror_error(e: DomainError) -> DomainError {
    match e {
        DomainError::NotFound(what) => DomainError::Storage(format!("{} missing from storage", what)),
        other => other,
    }
}
