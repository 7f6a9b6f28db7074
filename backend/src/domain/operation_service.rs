//! Operation service: create, read, update and delete income and expense
//! records, and compute the listing served to the dashboard.

use std::sync::Arc;

use chrono::Utc;
use shared::OperationKind;
use tracing::{info, warn};

use crate::domain::commands::{CreateOperationCommand, ListOperationsQuery, UpdateOperationCommand};
use crate::domain::models::operation::{AmountField, DomainOperation, NewOperation, OperationError};
use crate::storage::OperationStorage;

const DEFAULT_SOURCE: &str = "Unspecified";
const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// One page of each kind plus totals computed over everything stored
#[derive(Debug, Clone, PartialEq)]
pub struct OperationListing {
    pub income: Vec<DomainOperation>,
    pub expenses: Vec<DomainOperation>,
    pub total_income: usize,
    pub total_expenses: usize,
    pub balance: f64,
}

#[derive(Clone)]
pub struct OperationService {
    storage: Arc<dyn OperationStorage>,
}

impl OperationService {
    pub fn new(storage: Arc<dyn OperationStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_operations(&self, query: ListOperationsQuery) -> Result<OperationListing, OperationError> {
        let income = self.storage.list_operations(OperationKind::Income).await?;
        let expenses = self.storage.list_operations(OperationKind::Expense).await?;

        let balance = income
            .iter()
            .chain(expenses.iter())
            .map(DomainOperation::signed_amount)
            .sum();

        Ok(OperationListing {
            total_income: income.len(),
            total_expenses: expenses.len(),
            income: Self::page(income, &query),
            expenses: Self::page(expenses, &query),
            balance,
        })
    }

    pub async fn create_operation(&self, command: CreateOperationCommand) -> Result<DomainOperation, OperationError> {
        let kind = match command.kind.as_deref() {
            None => return Err(OperationError::MissingType),
            Some(raw) => OperationKind::from_wire(raw).ok_or(OperationError::InvalidType)?,
        };

        let AmountField::Value(amount) = command.amount else {
            return Err(OperationError::InvalidAmount);
        };

        let (label, details) = match kind {
            OperationKind::Income => (
                command.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
                command.description,
            ),
            OperationKind::Expense => (
                command.categorie.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                command.notes,
            ),
        };

        let operation = self
            .storage
            .insert_operation(NewOperation {
                kind,
                amount,
                label,
                details,
                created_at: Utc::now(),
            })
            .await?;

        info!("Created {} #{} ({:.2})", kind, operation.id, operation.amount);
        Ok(operation)
    }

    pub async fn get_operation(&self, id: &str) -> Result<DomainOperation, OperationError> {
        let id = Self::parse_id(id)?;
        self.storage
            .get_operation(id)
            .await?
            .ok_or(OperationError::NotFound)
    }

    pub async fn update_operation(
        &self,
        id: &str,
        command: UpdateOperationCommand,
    ) -> Result<DomainOperation, OperationError> {
        let mut operation = self.get_operation(id).await?;

        match command.amount {
            AmountField::Missing => {}
            AmountField::Invalid => return Err(OperationError::InvalidAmount),
            AmountField::Value(amount) => operation.amount = amount,
        }

        let (label, details) = match operation.kind {
            OperationKind::Income => (command.source, command.description),
            OperationKind::Expense => (command.categorie, command.notes),
        };
        if let Some(label) = label {
            operation.label = label;
        }
        if let Some(details) = details {
            operation.details = Some(details);
        }
        operation.updated_at = Utc::now();

        if !self.storage.update_operation(&operation).await? {
            warn!("Operation #{} disappeared during update", operation.id);
            return Err(OperationError::NotFound);
        }

        info!("Updated {} #{}", operation.kind, operation.id);
        Ok(operation)
    }

    pub async fn delete_operation(&self, id: &str) -> Result<(), OperationError> {
        let id = Self::parse_id(id)?;
        if !self.storage.delete_operation(id).await? {
            return Err(OperationError::NotFound);
        }

        info!("Deleted operation #{}", id);
        Ok(())
    }

    /// Start-up sample data: one salary and one grocery run
    pub async fn seed(&self) -> Result<(), OperationError> {
        let now = Utc::now();
        let samples = [
            (OperationKind::Income, 3000.0, "Salary", "Monthly salary"),
            (OperationKind::Expense, 150.0, "Groceries", "Weekly shopping"),
        ];

        for (kind, amount, label, details) in samples {
            self.storage
                .insert_operation(NewOperation {
                    kind,
                    amount,
                    label: label.to_string(),
                    details: Some(details.to_string()),
                    created_at: now,
                })
                .await?;
        }

        info!("Seeded {} sample operations", samples.len());
        Ok(())
    }

    /// Ids that are not numbers can never match a stored operation
    fn parse_id(id: &str) -> Result<u64, OperationError> {
        id.trim().parse::<u64>().map_err(|_| OperationError::NotFound)
    }

    fn page(operations: Vec<DomainOperation>, query: &ListOperationsQuery) -> Vec<DomainOperation> {
        operations
            .into_iter()
            .skip(query.offset())
            .take(query.per_page as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryOperationStorage;

    fn create_test_service() -> OperationService {
        OperationService::new(Arc::new(InMemoryOperationStorage::new()))
    }

    fn create_command(kind: Option<&str>, amount: AmountField, label: Option<&str>) -> CreateOperationCommand {
        CreateOperationCommand {
            kind: kind.map(str::to_string),
            amount,
            source: label.map(str::to_string),
            categorie: label.map(str::to_string),
            description: None,
            notes: None,
        }
    }

    fn update_command(amount: AmountField) -> UpdateOperationCommand {
        UpdateOperationCommand {
            amount,
            source: None,
            categorie: None,
            description: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_operations() {
        let service = create_test_service();

        service
            .create_operation(create_command(Some("revenu"), AmountField::Value(1000.0), Some("Salary")))
            .await
            .unwrap();
        service
            .create_operation(create_command(Some("depense"), AmountField::Value(200.0), Some("Groceries")))
            .await
            .unwrap();

        let listing = service.list_operations(ListOperationsQuery::default()).await.unwrap();

        assert_eq!(listing.income.len(), 1);
        assert_eq!(listing.expenses.len(), 1);
        assert_eq!(listing.income[0].label, "Salary");
        assert_eq!(listing.expenses[0].label, "Groceries");
        assert_eq!(listing.balance, 800.0);
    }

    #[tokio::test]
    async fn test_create_validation_errors() {
        let service = create_test_service();

        let missing_type = service
            .create_operation(create_command(None, AmountField::Value(10.0), Some("x")))
            .await;
        assert!(matches!(missing_type, Err(OperationError::MissingType)));

        let invalid_type = service
            .create_operation(create_command(Some("transfer"), AmountField::Value(10.0), Some("x")))
            .await;
        assert!(matches!(invalid_type, Err(OperationError::InvalidType)));

        let invalid_amount = service
            .create_operation(create_command(Some("depense"), AmountField::Invalid, Some("x")))
            .await;
        assert!(matches!(invalid_amount, Err(OperationError::InvalidAmount)));

        let missing_amount = service
            .create_operation(create_command(Some("depense"), AmountField::Missing, Some("x")))
            .await;
        assert!(matches!(missing_amount, Err(OperationError::InvalidAmount)));
    }

    #[tokio::test]
    async fn test_create_applies_default_labels() {
        let service = create_test_service();

        let income = service
            .create_operation(create_command(Some("revenu"), AmountField::Value(5.0), None))
            .await
            .unwrap();
        let expense = service
            .create_operation(create_command(Some("depense"), AmountField::Value(5.0), None))
            .await
            .unwrap();

        assert_eq!(income.label, "Unspecified");
        assert_eq!(expense.label, "Miscellaneous");
    }

    #[tokio::test]
    async fn test_update_operation() {
        let service = create_test_service();
        let created = service
            .create_operation(create_command(Some("depense"), AmountField::Value(40.0), Some("Food")))
            .await
            .unwrap();

        let mut command = update_command(AmountField::Value(55.5));
        command.categorie = Some("Restaurants".to_string());
        command.source = Some("ignored for expenses".to_string());
        let updated = service
            .update_operation(&created.id.to_string(), command)
            .await
            .unwrap();

        assert_eq!(updated.amount, 55.5);
        assert_eq!(updated.label, "Restaurants");
        assert!(updated.updated_at >= created.updated_at);

        let untouched = service
            .update_operation(&created.id.to_string(), update_command(AmountField::Missing))
            .await
            .unwrap();
        assert_eq!(untouched.amount, 55.5);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let service = create_test_service();
        let created = service
            .create_operation(create_command(Some("revenu"), AmountField::Value(10.0), Some("Gift")))
            .await
            .unwrap();

        let invalid = service
            .update_operation(&created.id.to_string(), update_command(AmountField::Invalid))
            .await;
        assert!(matches!(invalid, Err(OperationError::InvalidAmount)));

        let missing = service.update_operation("999", update_command(AmountField::Missing)).await;
        assert!(matches!(missing, Err(OperationError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_operation() {
        let service = create_test_service();
        let created = service
            .create_operation(create_command(Some("depense"), AmountField::Value(200.0), Some("Groceries")))
            .await
            .unwrap();
        let id = created.id.to_string();

        service.delete_operation(&id).await.unwrap();

        assert!(matches!(service.delete_operation(&id).await, Err(OperationError::NotFound)));
        assert!(matches!(service.get_operation(&id).await, Err(OperationError::NotFound)));
        assert!(matches!(service.delete_operation("not-a-number").await, Err(OperationError::NotFound)));
    }

    #[tokio::test]
    async fn test_pagination_keeps_totals_and_balance() {
        let service = create_test_service();
        for amount in 1..=15 {
            service
                .create_operation(create_command(Some("depense"), AmountField::Value(amount as f64), Some("Food")))
                .await
                .unwrap();
        }

        let first = service.list_operations(ListOperationsQuery::default()).await.unwrap();
        let second = service
            .list_operations(ListOperationsQuery::new(Some(2), None))
            .await
            .unwrap();

        assert_eq!(first.expenses.len(), 10);
        assert_eq!(second.expenses.len(), 5);
        assert_eq!(first.total_expenses, 15);
        assert_eq!(first.balance, -120.0);
        assert_eq!(second.balance, -120.0);
    }

    #[tokio::test]
    async fn test_seed() {
        let service = create_test_service();

        service.seed().await.unwrap();
        let listing = service.list_operations(ListOperationsQuery::default()).await.unwrap();

        assert_eq!(listing.income[0].label, "Salary");
        assert_eq!(listing.expenses[0].label, "Groceries");
        assert_eq!(listing.balance, 2850.0);
    }
}
