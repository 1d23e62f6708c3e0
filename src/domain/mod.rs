//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO storage dependencies (serde and chrono only).

mod amount;
mod entity;
mod entry;
mod report;
mod settings;
mod user;

pub use amount::Amount;
pub use entity::{DomainError, DomainResult, Entity};
pub use entry::{
    format_entry_date, parse_entry_date, stored_entry_date, BudgetEntry, Category, EntryType, NewEntry,
};
pub use report::{
    category_breakdown, daily_series, month_bounds, period_totals, week_bounds, BudgetProgress,
    DailyTotals, PeriodTotals, Report, Totals,
};
pub use settings::BudgetSettings;
pub use user::{PlaintextCredentials, User};
