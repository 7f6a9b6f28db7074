use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

pub mod aggregation;
pub mod dates;
pub mod error;
pub mod forms;
pub mod presentation;

pub use aggregation::{
    aggregate, aggregate_by_category, aggregate_in, aggregate_monthly_balance,
    aggregate_monthly_balance_in, CategoryTotals, DashboardAggregates, MonthKey, MonthlyBalance,
    MonthlyBalanceSeries,
};
pub use error::DashboardError;

/// Kind of an operation. Income adds to the balance, expense subtracts from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    #[serde(rename = "revenu")]
    Income,
    #[serde(rename = "depense")]
    Expense,
}

impl OperationKind {
    /// Name used on the wire and in request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Income => "revenu",
            OperationKind::Expense => "depense",
        }
    }

    /// Parse the wire name of a kind
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "revenu" => Some(OperationKind::Income),
            "depense" => Some(OperationKind::Expense),
            _ => None,
        }
    }

    /// Sign applied to the amount magnitude in balance computations
    pub fn sign(&self) -> f64 {
        match self {
            OperationKind::Income => 1.0,
            OperationKind::Expense => -1.0,
        }
    }

    /// Human label of the descriptive field carried by this kind
    pub fn label_name(&self) -> &'static str {
        match self {
            OperationKind::Income => "source",
            OperationKind::Expense => "category",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income or expense record as the dashboard sees it.
///
/// `label` is the source of an income or the category of an expense.
/// `amount` is `None` when the backend sent nothing usable; it counts as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub id: String,
    pub kind: OperationKind,
    pub amount: Option<f64>,
    pub label: String,
    pub occurred_at: Option<String>,
}

impl Operation {
    pub fn new(
        id: impl Into<String>,
        kind: OperationKind,
        amount: Option<f64>,
        label: impl Into<String>,
        occurred_at: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            amount,
            label: label.into(),
            occurred_at: occurred_at.map(str::to_string),
        }
    }

    /// Build an operation from a wire record, reading the label field selected by `kind`
    pub fn from_record(kind: OperationKind, record: OperationRecord) -> Self {
        let label = match kind {
            OperationKind::Income => record.source,
            OperationKind::Expense => record.categorie,
        };

        Self {
            id: record.id,
            kind,
            amount: record.montant,
            label: presentation::text_or_empty(label.as_deref()),
            occurred_at: record.created_at,
        }
    }

    /// Absolute amount, zero when missing
    pub fn magnitude(&self) -> f64 {
        self.amount
            .filter(|amount| amount.is_finite())
            .map(f64::abs)
            .unwrap_or(0.0)
    }
}

/// Operation as served by `GET /api/operations` and returned by mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<OperationKind>,
    #[serde(default, deserialize_with = "deserialize_lenient_amount")]
    pub montant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// ISO 8601 timestamp of when the operation happened
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `GET /api/operations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsResponse {
    #[serde(default)]
    pub solde: f64,
    #[serde(default)]
    pub revenus: Vec<OperationRecord>,
    #[serde(default)]
    pub depenses: Vec<OperationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_revenus: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_depenses: Option<u64>,
}

impl OperationsResponse {
    /// Tag every record with the kind of the list it came from
    pub fn into_snapshot(self) -> OperationsSnapshot {
        OperationsSnapshot {
            balance: self.solde,
            income: self
                .revenus
                .into_iter()
                .map(|record| Operation::from_record(OperationKind::Income, record))
                .collect(),
            expenses: self
                .depenses
                .into_iter()
                .map(|record| Operation::from_record(OperationKind::Expense, record))
                .collect(),
        }
    }
}

/// Everything one full load of the dashboard needs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationsSnapshot {
    pub balance: f64,
    pub income: Vec<Operation>,
    pub expenses: Vec<Operation>,
}

/// Body of `POST /api/operations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOperationRequest {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub montant: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateOperationRequest {
    /// Request carrying `label` in the field that matches `kind`
    pub fn new(kind: OperationKind, amount: f64, label: impl Into<String>) -> Self {
        let label = Some(label.into());
        let (source, categorie) = match kind {
            OperationKind::Income => (label, None),
            OperationKind::Expense => (None, label),
        };

        Self {
            kind,
            montant: amount,
            source,
            categorie,
            description: None,
            notes: None,
        }
    }
}

/// Body of `PUT /api/operations/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateOperationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub montant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UpdateOperationRequest {
    pub fn new(kind: OperationKind, amount: f64, label: impl Into<String>) -> Self {
        let label = Some(label.into());
        let (source, categorie) = match kind {
            OperationKind::Income => (label, None),
            OperationKind::Expense => (None, label),
        };

        Self {
            montant: Some(amount),
            source,
            categorie,
            ..Self::default()
        }
    }
}

/// Error body sent by the backend with non-2xx statuses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Log line forwarded from the browser to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    #[serde(default)]
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Ids are opaque: accept JSON numbers as well as strings
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Anything that is not a finite number (or a numeric string) becomes `None`
fn deserialize_lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|amount| amount.is_finite()))
}
