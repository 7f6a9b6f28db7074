//! View models for the dashboard tables and charts.
//!
//! Formatting fallbacks live here and nowhere else: a missing number shows
//! as zero, a missing text as an empty string.

use chrono::{Local, TimeZone};

use crate::aggregation::{aggregate_in, CategoryTotals, MonthlyBalance};
use crate::{Operation, OperationKind, OperationsSnapshot};

pub const CURRENCY_SYMBOL: &str = "€";

/// RGB colour used by the chart renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Slice colours of the expense breakdown, reused cyclically
pub const PIE_PALETTE: [Rgb; 8] = [
    Rgb(0xFF, 0x63, 0x84),
    Rgb(0x36, 0xA2, 0xEB),
    Rgb(0xFF, 0xCE, 0x56),
    Rgb(0x4B, 0xC0, 0xC0),
    Rgb(0x99, 0x66, 0xFF),
    Rgb(0xFF, 0x9F, 0x40),
    Rgb(0x8A, 0xC2, 0x4A),
    Rgb(0x60, 0x7D, 0x8B),
];

pub const LINE_COLOR: Rgb = Rgb(0x4B, 0xC0, 0xC0);

/// Numeric fields default to zero
pub fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|value| value.is_finite()).unwrap_or(0.0)
}

/// Text fields default to the empty string
pub fn text_or_empty(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Two decimals, `"0.00"` when the amount is missing
pub fn format_amount(amount: Option<f64>) -> String {
    format!("{:.2}", number_or_zero(amount))
}

pub fn format_balance(balance: f64) -> String {
    format_amount(Some(balance))
}

/// Labels and values as parallel, index-paired sequences
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// One slice per category, in category order
    pub fn from_category_totals(totals: &CategoryTotals) -> Self {
        let (labels, values) = totals
            .iter()
            .map(|(category, total)| (category.clone(), *total))
            .unzip();
        Self { labels, values }
    }

    /// One point per month, in the order of the series
    pub fn from_monthly_balance(series: &[MonthlyBalance]) -> Self {
        let (labels, values) = series
            .iter()
            .map(|entry| (entry.month.to_string(), entry.net))
            .unzip();
        Self { labels, values }
    }

    pub fn len(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    /// Nothing to draw; the chart shows its no-data message instead
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Line,
}

/// Styling passed along with the data to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub palette: Vec<Rgb>,
    pub line_color: Rgb,
    /// Opacity of the area under a line chart, 0 disables the fill
    pub fill_opacity: f64,
    pub begin_at_zero: bool,
    pub dataset_label: Option<String>,
}

impl ChartStyle {
    pub fn pie() -> Self {
        Self {
            palette: PIE_PALETTE.to_vec(),
            line_color: LINE_COLOR,
            fill_opacity: 0.0,
            begin_at_zero: true,
            dataset_label: None,
        }
    }

    pub fn line() -> Self {
        Self {
            palette: vec![LINE_COLOR],
            line_color: LINE_COLOR,
            fill_opacity: 0.1,
            begin_at_zero: false,
            dataset_label: Some("Monthly balance".to_string()),
        }
    }

    pub fn color_for(&self, index: usize) -> Rgb {
        if self.palette.is_empty() {
            return self.line_color;
        }
        self.palette[index % self.palette.len()]
    }
}

/// Everything a chart mount point needs to draw itself
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub empty_message: String,
    pub series: ChartSeries,
    pub style: ChartStyle,
}

impl ChartSpec {
    pub fn expense_breakdown(totals: &CategoryTotals) -> Self {
        Self {
            kind: ChartKind::Pie,
            title: "Expenses by category".to_string(),
            empty_message: "No expense data available".to_string(),
            series: ChartSeries::from_category_totals(totals),
            style: ChartStyle::pie(),
        }
    }

    pub fn balance_evolution(series: &[MonthlyBalance]) -> Self {
        Self {
            kind: ChartKind::Line,
            title: "Monthly balance".to_string(),
            empty_message: "No historical data available".to_string(),
            series: ChartSeries::from_monthly_balance(series),
            style: ChartStyle::line(),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }
}

/// One table row with its delete/modify actions keyed by `id` and `kind`
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRow {
    pub id: String,
    pub kind: OperationKind,
    pub amount: String,
    pub label: String,
}

impl OperationRow {
    pub fn from_operation(operation: &Operation) -> Self {
        Self {
            id: operation.id.clone(),
            kind: operation.kind,
            amount: format_amount(operation.amount),
            label: operation.label.clone(),
        }
    }

    pub fn display_amount(&self) -> String {
        format!("{} {}", self.amount, CURRENCY_SYMBOL)
    }
}

pub fn rows_for(operations: &[Operation]) -> Vec<OperationRow> {
    operations.iter().map(OperationRow::from_operation).collect()
}

/// Rendered state of the whole dashboard for one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub balance: String,
    pub income_rows: Vec<OperationRow>,
    pub expense_rows: Vec<OperationRow>,
    pub expense_chart: ChartSpec,
    pub evolution_chart: ChartSpec,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &OperationsSnapshot) -> Self {
        Self::from_snapshot_in(snapshot, &Local)
    }

    pub fn from_snapshot_in<Tz: TimeZone>(snapshot: &OperationsSnapshot, tz: &Tz) -> Self {
        let aggregates = aggregate_in(snapshot, tz);

        Self {
            balance: format_balance(snapshot.balance),
            income_rows: rows_for(&snapshot.income),
            expense_rows: rows_for(&snapshot.expenses),
            expense_chart: ChartSpec::expense_breakdown(&aggregates.category_totals),
            evolution_chart: ChartSpec::balance_evolution(&aggregates.monthly_balance),
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::from_snapshot_in(&OperationsSnapshot::default(), &chrono::Utc)
    }
}
