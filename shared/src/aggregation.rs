//! Aggregation of raw operations into the two derived dashboard views:
//! expense totals per category and the net balance of each month.
//!
//! Malformed records are skipped, never reported: a missing category keeps an
//! expense out of the category totals, a missing or unreadable date keeps an
//! operation out of the monthly series, and a missing amount counts as zero.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::dates::parse_timestamp;
use crate::{Operation, OperationKind, OperationsSnapshot};

/// Accumulated expense magnitude per category, ordered by category name
pub type CategoryTotals = BTreeMap<String, f64>;

/// Net balance per month in ascending month order
pub type MonthlyBalanceSeries = Vec<MonthlyBalance>;

/// Calendar month used to bucket operations.
///
/// Ordering is by year then month, the same order as the `YYYY-MM` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBalance {
    pub month: MonthKey,
    pub net: f64,
}

/// Both derived views of one snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardAggregates {
    pub category_totals: CategoryTotals,
    pub monthly_balance: MonthlyBalanceSeries,
}

/// Sum expense magnitudes per non-empty category.
///
/// Income records that end up in the list are ignored, and a category whose
/// expenses sum to zero is left out.
pub fn aggregate_by_category(expenses: &[Operation]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();

    for expense in expenses {
        if expense.kind != OperationKind::Expense || expense.label.is_empty() {
            continue;
        }
        *totals.entry(expense.label.clone()).or_insert(0.0) += expense.magnitude();
    }

    totals.retain(|_, total| *total > 0.0);
    totals
}

/// Net balance per month, bucketed in the viewer's local time zone
pub fn aggregate_monthly_balance(income: &[Operation], expenses: &[Operation]) -> MonthlyBalanceSeries {
    aggregate_monthly_balance_in(income, expenses, &Local)
}

/// Net balance per month, bucketed in `tz`.
///
/// Every income contributes `+amount` and every expense `-amount`, whatever
/// sign the stored amount carries.
pub fn aggregate_monthly_balance_in<Tz: TimeZone>(
    income: &[Operation],
    expenses: &[Operation],
    tz: &Tz,
) -> MonthlyBalanceSeries {
    let contributions = income
        .iter()
        .map(|operation| (operation, 1.0))
        .chain(expenses.iter().map(|operation| (operation, -1.0)));

    let mut per_month: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for (operation, sign) in contributions {
        let Some(timestamp) = operation.occurred_at.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        let month = MonthKey::from_date(timestamp.calendar_date_in(tz));
        *per_month.entry(month).or_insert(0.0) += sign * operation.magnitude();
    }

    per_month
        .into_iter()
        .map(|(month, net)| MonthlyBalance { month, net })
        .collect()
}

/// Run both aggregations over a snapshot in the viewer's local time zone
pub fn aggregate(snapshot: &OperationsSnapshot) -> DashboardAggregates {
    aggregate_in(snapshot, &Local)
}

pub fn aggregate_in<Tz: TimeZone>(snapshot: &OperationsSnapshot, tz: &Tz) -> DashboardAggregates {
    DashboardAggregates {
        category_totals: aggregate_by_category(&snapshot.expenses),
        monthly_balance: aggregate_monthly_balance_in(&snapshot.income, &snapshot.expenses, tz),
    }
}
