//! Validation of the creation form and of the edit prompts.

use crate::presentation::CURRENCY_SYMBOL;
use crate::{CreateOperationRequest, DashboardError, OperationKind, UpdateOperationRequest};

/// Parse a user-typed amount: currency symbol and spaces are ignored,
/// a decimal comma is accepted
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Validate the creation form. A zero or unreadable amount, or a blank
/// description, counts as a missing field.
pub fn validate_new_operation(
    kind: OperationKind,
    amount_input: &str,
    description: &str,
) -> Result<CreateOperationRequest, DashboardError> {
    let description = description.trim();
    let amount = parse_amount(amount_input).filter(|amount| *amount != 0.0);

    let Some(amount) = amount.filter(|_| !description.is_empty()) else {
        return Err(DashboardError::Validation("Please fill in all fields".to_string()));
    };

    if amount < 0.0 {
        return Err(DashboardError::Validation("Amount must be positive".to_string()));
    }

    Ok(CreateOperationRequest::new(kind, amount, description))
}

/// Build an update from the edit prompts.
///
/// `None` inputs mean the prompt was cancelled. A cancelled or blank label
/// aborts the edit; an unreadable amount falls back to zero.
pub fn build_update(
    kind: OperationKind,
    amount_input: Option<&str>,
    label_input: Option<&str>,
) -> Option<UpdateOperationRequest> {
    let label = label_input.map(str::trim).filter(|label| !label.is_empty())?;
    let amount = amount_input.and_then(parse_amount).unwrap_or(0.0);

    Some(UpdateOperationRequest::new(kind, amount, label))
}
