use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use shared::OperationKind;

/// Operation as kept by the store
#[derive(Debug, Clone, PartialEq)]
pub struct DomainOperation {
    pub id: u64,
    pub kind: OperationKind,
    pub amount: f64,
    /// Source of an income, category of an expense
    pub label: String,
    /// Free text: description of an income, notes of an expense
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainOperation {
    /// Contribution to the overall balance
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Fields of an operation before the store assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperation {
    pub kind: OperationKind,
    pub amount: f64,
    pub label: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Amount as found in a request body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountField {
    Missing,
    Invalid,
    Value(f64),
}

impl AmountField {
    /// Numbers and numeric strings are accepted, anything else is invalid
    pub fn from_json(value: Option<&Value>) -> Self {
        let amount = match value {
            None | Some(Value::Null) => return AmountField::Missing,
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };

        match amount {
            Some(amount) if amount.is_finite() => AmountField::Value(amount),
            _ => AmountField::Invalid,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("Missing operation type (revenu/depense)")]
    MissingType,
    #[error("Invalid operation type")]
    InvalidType,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Operation not found")]
    NotFound,
    #[error("Storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}
