//! Derived Figures
//!
//! Pure functions over an entry slice: the three ledger totals and the
//! calendar-bounded sums behind the dashboard and report screens.
//! Calendar days are UTC days; weeks start on Sunday.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::amount::Amount;
use super::entry::{BudgetEntry, EntryType};

/// Number of days in the trailing chart series
pub const DAILY_SERIES_DAYS: u32 = 7;

/// Ledger-wide totals, recomputed on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub income: Amount,
    pub expenses: Amount,
    pub balance: Amount,
}

impl Totals {
    pub fn from_entries(entries: &[BudgetEntry]) -> Self {
        let sums = PeriodTotals::from_iter(entries.iter());
        Self {
            income: sums.income,
            expenses: sums.expenses,
            balance: sums.income - sums.expenses,
        }
    }
}

/// Income and expense sums over some subset of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub income: Amount,
    pub expenses: Amount,
}

impl PeriodTotals {
    pub fn add(&mut self, entry: &BudgetEntry) {
        match entry.entry_type {
            EntryType::Income => self.income += entry.amount,
            EntryType::Expense => self.expenses += entry.amount,
        }
    }

    pub fn net(&self) -> Amount {
        self.income - self.expenses
    }
}

impl<'a> FromIterator<&'a BudgetEntry> for PeriodTotals {
    fn from_iter<I: IntoIterator<Item = &'a BudgetEntry>>(iter: I) -> Self {
        let mut totals = PeriodTotals::default();
        for entry in iter {
            totals.add(entry);
        }
        totals
    }
}

/// One point of the trailing daily series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: Amount,
    pub expenses: Amount,
}

fn entry_day(entry: &BudgetEntry) -> NaiveDate {
    entry.date.date_naive()
}

fn in_range(entry: &BudgetEntry, from: NaiveDate, to: NaiveDate) -> bool {
    let day = entry_day(entry);
    day >= from && day <= to
}

/// Sunday-start week containing `today`, inclusive on both ends
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = today - Days::new(today.weekday().num_days_from_sunday() as u64);
    (start, start + Days::new(6))
}

/// First and last day of the month containing `today`
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Days::new(today.day0() as u64);
    let last = first + Months::new(1) - Days::new(1);
    (first, last)
}

pub fn period_totals(entries: &[BudgetEntry], from: NaiveDate, to: NaiveDate) -> PeriodTotals {
    entries.iter().filter(|e| in_range(e, from, to)).collect()
}

/// `days` consecutive days ending at `today`, oldest first
pub fn daily_series(entries: &[BudgetEntry], today: NaiveDate, days: u32) -> Vec<DailyTotals> {
    (0..days as u64)
        .rev()
        .map(|back| {
            let date = today - Days::new(back);
            let sums = period_totals(entries, date, date);
            DailyTotals {
                date,
                income: sums.income,
                expenses: sums.expenses,
            }
        })
        .collect()
}

pub fn category_breakdown(
    entries: &[BudgetEntry],
    from: NaiveDate,
    to: NaiveDate,
) -> BTreeMap<String, PeriodTotals> {
    let mut stats: BTreeMap<String, PeriodTotals> = BTreeMap::new();
    for entry in entries.iter().filter(|e| in_range(e, from, to)) {
        stats.entry(entry.category.clone()).or_default().add(entry);
    }
    stats
}

/// Everything the report screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub today: NaiveDate,
    pub last_7_days: Vec<DailyTotals>,
    pub category_stats: BTreeMap<String, PeriodTotals>,
    pub weekly: PeriodTotals,
    pub monthly: PeriodTotals,
}

impl Report {
    pub fn build(entries: &[BudgetEntry], today: NaiveDate) -> Self {
        let (week_start, week_end) = week_bounds(today);
        let (month_start, month_end) = month_bounds(today);

        Self {
            today,
            last_7_days: daily_series(entries, today, DAILY_SERIES_DAYS),
            category_stats: category_breakdown(entries, month_start, month_end),
            weekly: period_totals(entries, week_start, week_end),
            monthly: period_totals(entries, month_start, month_end),
        }
    }
}

/// Current-week spending against the weekly limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub budget: Amount,
    pub spent: Amount,
    pub remaining: Amount,
    /// Share of the budget spent, capped at 100
    pub percent: f64,
}

impl BudgetProgress {
    pub fn compute(budget: Amount, entries: &[BudgetEntry], today: NaiveDate) -> Self {
        let (start, end) = week_bounds(today);
        let spent = period_totals(entries, start, end).expenses;

        Self {
            budget,
            spent,
            remaining: budget - spent,
            percent: spent.percent_of(budget).min(100.0),
        }
    }

    pub fn is_over(&self) -> bool {
        self.spent > self.budget
    }
}
