//! Inputs of the operation service, decoded from requests by the REST layer.

use crate::domain::models::operation::AmountField;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOperationCommand {
    /// Raw `type` field, validated by the service
    pub kind: Option<String>,
    pub amount: AmountField,
    pub source: Option<String>,
    pub categorie: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Partial update. Fields that belong to the other kind are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOperationCommand {
    pub amount: AmountField,
    pub source: Option<String>,
    pub categorie: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOperationsQuery {
    pub page: u32,
    pub per_page: u32,
}

impl ListOperationsQuery {
    pub const DEFAULT_PER_PAGE: u32 = 10;
    pub const MAX_PER_PAGE: u32 = 1000;

    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }
}

impl Default for ListOperationsQuery {
    fn default() -> Self {
        Self::new(None, None)
    }
}
