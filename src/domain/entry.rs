//! Budget Entry Entity
//!
//! One income or expense record in the ledger.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::entity::{DomainError, DomainResult, Entity};

/// Entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    #[default]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            other => Err(DomainError::InvalidInput(format!("unknown entry type '{}'", other))),
        }
    }
}

/// The fixed label set offered by the entry form
///
/// Entries store the label as plain text; the store itself accepts any string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Healthcare,
    Shopping,
    Education,
    Salary,
    Investment,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Food,
        Category::Transportation,
        Category::Housing,
        Category::Utilities,
        Category::Entertainment,
        Category::Healthcare,
        Category::Shopping,
        Category::Education,
        Category::Salary,
        Category::Investment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Housing => "Housing",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the label set
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl NewEntry {
    pub fn new(
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        entry_type: EntryType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date,
            entry_type,
        }
    }
}

/// A persisted ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Assigned by the backing store on insert
    pub id: i64,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl BudgetEntry {
    pub fn from_new(id: i64, entry: NewEntry) -> Self {
        Self {
            id,
            amount: entry.amount,
            category: entry.category,
            description: entry.description,
            date: entry.date,
            entry_type: entry.entry_type,
        }
    }

    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }
}

impl Entity for BudgetEntry {
    type Id = i64;
    type Draft = NewEntry;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Sortable text form used in the `date` column (`2024-05-01T12:00:00.000Z`)
pub fn format_entry_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate to the millisecond precision the `date` column keeps
pub fn stored_entry_date(date: DateTime<Utc>) -> DateTime<Utc> {
    date.trunc_subsecs(3)
}

pub fn parse_entry_date(s: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| DomainError::Storage(format!("bad entry date '{}': {}", s, e)))
}
