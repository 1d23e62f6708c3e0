//! Report and Budget Commands
//!
//! Dashboard/report figures and the weekly spending limit.

use chrono::{NaiveDate, Utc};

use crate::domain::{BudgetProgress, BudgetSettings, Report};
use crate::AppState;
use super::entry_cmd::{parse_positive_amount, INVALID_AMOUNT};

pub const BUDGET_UPDATE_FAILED: &str = "Failed to update weekly budget";
pub const BUDGET_LOAD_FAILED: &str = "Failed to load weekly budget";

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn get_report(state: &AppState) -> Report {
    get_report_for(state, today()).await
}

pub async fn get_report_for(state: &AppState, today: NaiveDate) -> Report {
    let ledger = state.ledger.lock().await;
    Report::build(ledger.entries(), today)
}

pub async fn get_budget_settings(state: &AppState) -> Result<BudgetSettings, String> {
    state.settings.load().await.map_err(|e| {
        log::error!("Loading budget settings failed: {}", e);
        BUDGET_LOAD_FAILED.to_string()
    })
}

pub async fn set_weekly_budget(state: &AppState, amount: &str) -> Result<BudgetSettings, String> {
    let amount = parse_positive_amount(amount).map_err(|_| INVALID_AMOUNT.to_string())?;
    let settings = BudgetSettings::with_weekly_budget(amount);

    state.settings.save(&settings).await.map_err(|e| {
        log::error!("Saving weekly budget failed: {}", e);
        BUDGET_UPDATE_FAILED.to_string()
    })?;
    Ok(settings)
}

/// `None` until a weekly budget has been set
pub async fn get_budget_progress(state: &AppState) -> Result<Option<BudgetProgress>, String> {
    get_budget_progress_for(state, today()).await
}

pub async fn get_budget_progress_for(
    state: &AppState,
    today: NaiveDate,
) -> Result<Option<BudgetProgress>, String> {
    let settings = get_budget_settings(state).await?;
    let Some(budget) = settings.weekly_budget else {
        return Ok(None);
    };

    let ledger = state.ledger.lock().await;
    Ok(Some(BudgetProgress::compute(budget, ledger.entries(), today)))
}
