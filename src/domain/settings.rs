//! Budget settings

use serde::{Deserialize, Serialize};
use super::amount::Amount;

/// User-editable limits; a single row per installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Spending limit for the current Sunday-start week (unset until edited)
    pub weekly_budget: Option<Amount>,
}

impl BudgetSettings {
    pub fn with_weekly_budget(amount: Amount) -> Self {
        Self {
            weekly_budget: Some(amount),
        }
    }
}
