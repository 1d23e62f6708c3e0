//! Entry Commands
//!
//! Validate form input, call the ledger, turn failures into short messages.

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::domain::{Amount, BudgetEntry, Category, EntryType, NewEntry, Totals};
use crate::store::Change;
use crate::AppState;

pub const INVALID_AMOUNT: &str = "Please enter a valid amount";
pub const MISSING_DESCRIPTION: &str = "Please enter a description";
pub const MISSING_CATEGORY: &str = "Please select a category";
pub const ADD_FAILED: &str = "Failed to add entry";
pub const UPDATE_FAILED: &str = "Failed to update entry";
pub const DELETE_FAILED: &str = "Failed to delete entry";
pub const LOAD_FAILED: &str = "Failed to load entries";

/// Raw values from the add/edit form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryForm {
    pub amount: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl EntryForm {
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        entry_type: EntryType,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            category: category.into(),
            entry_type,
        }
    }
}

struct ValidForm {
    amount: Amount,
    description: String,
    category: String,
    entry_type: EntryType,
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("amount pattern is valid"))
}

/// Digits with up to two decimals, strictly positive, at most `Amount::MAX_ENTRY`
pub(crate) fn parse_positive_amount(text: &str) -> Result<Amount, String> {
    let text = text.trim();
    if !amount_pattern().is_match(text) {
        return Err(INVALID_AMOUNT.to_string());
    }
    match text.parse::<Amount>() {
        Ok(amount) if amount.is_positive() && amount <= Amount::MAX_ENTRY => Ok(amount),
        _ => Err(INVALID_AMOUNT.to_string()),
    }
}

fn validate(form: EntryForm) -> Result<ValidForm, String> {
    let amount = parse_positive_amount(&form.amount)?;

    let description = form.description.trim();
    if description.is_empty() {
        return Err(MISSING_DESCRIPTION.to_string());
    }

    let category = Category::from_label(form.category.trim())
        .ok_or_else(|| MISSING_CATEGORY.to_string())?;

    Ok(ValidForm {
        amount,
        description: description.to_string(),
        category: category.as_str().to_string(),
        entry_type: form.entry_type,
    })
}

/// Labels offered by the category picker
pub fn list_categories() -> Vec<&'static str> {
    Category::labels()
}

/// Create an entry dated now
pub async fn add_entry(state: &AppState, form: EntryForm) -> Result<BudgetEntry, String> {
    let valid = validate(form)?;
    let entry = NewEntry::new(
        valid.amount,
        valid.category,
        valid.description,
        valid.entry_type,
        Utc::now(),
    );

    let mut ledger = state.ledger.lock().await;
    ledger.add(entry).await.map_err(|e| {
        log::error!("add_entry failed: {}", e);
        ADD_FAILED.to_string()
    })
}

pub async fn list_entries(state: &AppState) -> Vec<BudgetEntry> {
    state.ledger.lock().await.entries().to_vec()
}

pub async fn get_entry(state: &AppState, id: i64) -> Option<BudgetEntry> {
    state.ledger.lock().await.get(id).cloned()
}

pub async fn get_totals(state: &AppState) -> Totals {
    state.ledger.lock().await.totals()
}

/// Re-read the ledger from the database
pub async fn reload_entries(state: &AppState) -> Result<Vec<BudgetEntry>, String> {
    let mut ledger = state.ledger.lock().await;
    ledger.load().await.map(|entries| entries.to_vec()).map_err(|e| {
        log::error!("reload_entries failed: {}", e);
        LOAD_FAILED.to_string()
    })
}

/// Replace an entry's fields; its date is kept
pub async fn update_entry(state: &AppState, id: i64, form: EntryForm) -> Result<Change, String> {
    let valid = validate(form)?;

    let mut ledger = state.ledger.lock().await;
    let Some(existing) = ledger.get(id) else {
        return Ok(Change::NoMatch);
    };

    let updated = BudgetEntry {
        id,
        amount: valid.amount,
        category: valid.category,
        description: valid.description,
        date: existing.date,
        entry_type: valid.entry_type,
    };

    ledger.update(updated).await.map_err(|e| {
        log::error!("update_entry {} failed: {}", id, e);
        UPDATE_FAILED.to_string()
    })
}

pub async fn delete_entry(state: &AppState, id: i64) -> Result<Change, String> {
    let mut ledger = state.ledger.lock().await;
    ledger.delete(id).await.map_err(|e| {
        log::error!("delete_entry {} failed: {}", id, e);
        DELETE_FAILED.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_state;

    #[test]
    fn test_amount_validation() {
        assert_eq!(parse_positive_amount("50.00").unwrap(), Amount::from_cents(5000));
        assert_eq!(parse_positive_amount(" 7.5 ").unwrap(), Amount::from_cents(750));
        for bad in ["", "0", "0.00", "-5", "5.123", "abc", "5.", "1e3"] {
            assert_eq!(parse_positive_amount(bad).unwrap_err(), INVALID_AMOUNT, "input {:?}", bad);
        }
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(parse_positive_amount("1000000000").unwrap(), Amount::MAX_ENTRY);
        assert_eq!(parse_positive_amount("1000000000.00").unwrap(), Amount::MAX_ENTRY);
        for too_big in ["1000000000.01", "92233720368547758", "99999999999999999999"] {
            assert_eq!(parse_positive_amount(too_big).unwrap_err(), INVALID_AMOUNT, "input {:?}", too_big);
        }
    }

    #[tokio::test]
    async fn test_oversized_amounts_rejected_and_totals_hold() {
        let state = test_state().await;

        for _ in 0..2 {
            let err = add_entry(&state, EntryForm::new("92233720368547758", "Windfall", "Other", EntryType::Income))
                .await
                .unwrap_err();
            assert_eq!(err, INVALID_AMOUNT);
        }
        for _ in 0..2 {
            add_entry(&state, EntryForm::new("1000000000", "Windfall", "Other", EntryType::Income))
                .await
                .unwrap();
        }

        let totals = get_totals(&state).await;
        assert_eq!(totals.income, Amount::from_major(2_000_000_000));
        assert_eq!(totals.balance, totals.income);
    }

    #[tokio::test]
    async fn test_add_entry_trims_and_persists() {
        let state = test_state().await;

        let entry = add_entry(&state, EntryForm::new("12.50", "  Groceries  ", "Food", EntryType::Expense))
            .await
            .unwrap();

        assert_eq!(entry.description, "Groceries");
        assert_eq!(entry.amount, Amount::from_cents(1250));
        assert_eq!(list_entries(&state).await, vec![entry.clone()]);
        assert_eq!(get_entry(&state, entry.id).await, Some(entry.clone()));
        assert_eq!(reload_entries(&state).await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn test_validation_order_and_messages() {
        let state = test_state().await;

        let err = add_entry(&state, EntryForm::new("", "", "", EntryType::Expense)).await.unwrap_err();
        assert_eq!(err, INVALID_AMOUNT);

        let err = add_entry(&state, EntryForm::new("10", "   ", "", EntryType::Expense)).await.unwrap_err();
        assert_eq!(err, MISSING_DESCRIPTION);

        let err = add_entry(&state, EntryForm::new("10", "Bus", "", EntryType::Expense)).await.unwrap_err();
        assert_eq!(err, MISSING_CATEGORY);

        let err = add_entry(&state, EntryForm::new("10", "Bus", "Travel", EntryType::Expense)).await.unwrap_err();
        assert_eq!(err, MISSING_CATEGORY);

        assert!(list_entries(&state).await.is_empty());
    }

    #[tokio::test]
    async fn test_totals_follow_commands() {
        let state = test_state().await;
        let lunch = add_entry(&state, EntryForm::new("50.00", "Lunch", "Food", EntryType::Expense))
            .await
            .unwrap();
        add_entry(&state, EntryForm::new("1000.00", "Paycheck", "Salary", EntryType::Income))
            .await
            .unwrap();

        let totals = get_totals(&state).await;
        assert_eq!(totals.balance.to_string(), "950.00");

        assert_eq!(delete_entry(&state, lunch.id).await.unwrap(), Change::Applied);
        assert_eq!(delete_entry(&state, lunch.id).await.unwrap(), Change::NoMatch);
        assert_eq!(get_totals(&state).await.balance.to_string(), "1000.00");
    }

    #[tokio::test]
    async fn test_update_keeps_date() {
        let state = test_state().await;
        let entry = add_entry(&state, EntryForm::new("5", "Bus", "Transportation", EntryType::Expense))
            .await
            .unwrap();

        let change = update_entry(&state, entry.id, EntryForm::new("6.25", "Tram", "Transportation", EntryType::Expense))
            .await
            .unwrap();
        assert_eq!(change, Change::Applied);

        let stored = get_entry(&state, entry.id).await.unwrap();
        assert_eq!(stored.description, "Tram");
        assert_eq!(stored.amount, Amount::from_cents(625));
        assert_eq!(stored.date, entry.date);
    }

    #[tokio::test]
    async fn test_update_missing_and_invalid() {
        let state = test_state().await;

        let change = update_entry(&state, 99, EntryForm::new("1", "x", "Other", EntryType::Income))
            .await
            .unwrap();
        assert_eq!(change, Change::NoMatch);

        let err = update_entry(&state, 99, EntryForm::new("x", "x", "Other", EntryType::Income))
            .await
            .unwrap_err();
        assert_eq!(err, INVALID_AMOUNT);
    }

    #[tokio::test]
    async fn test_storage_failure_message() {
        let state = test_state().await;
        state.db_state.close().await;

        let err = add_entry(&state, EntryForm::new("5", "Bus", "Transportation", EntryType::Expense))
            .await
            .unwrap_err();
        assert_eq!(err, ADD_FAILED);
        assert!(list_entries(&state).await.is_empty());
        assert_eq!(reload_entries(&state).await.unwrap_err(), LOAD_FAILED);
    }

    #[test]
    fn test_categories_listed() {
        let labels = list_categories();
        assert_eq!(labels.first(), Some(&"Food"));
        assert_eq!(labels.last(), Some(&"Other"));
    }
}
