use shared::{OperationKind, OperationRecord, OperationsResponse};

use crate::domain::models::operation::DomainOperation;
use crate::domain::operation_service::OperationListing;

pub struct OperationMapper;

impl OperationMapper {
    /// Convert a stored operation to its wire record.
    /// The label and details land in the fields named after the kind.
    pub fn to_dto(domain: DomainOperation) -> OperationRecord {
        let (source, categorie, description, notes) = match domain.kind {
            OperationKind::Income => (Some(domain.label), None, domain.details, None),
            OperationKind::Expense => (None, Some(domain.label), None, domain.details),
        };

        OperationRecord {
            id: domain.id.to_string(),
            kind: Some(domain.kind),
            montant: Some(domain.amount),
            source,
            categorie,
            description,
            notes,
            created_at: Some(DomainOperation::format_timestamp(&domain.created_at)),
            updated_at: Some(DomainOperation::format_timestamp(&domain.updated_at)),
        }
    }

    pub fn to_dto_list(domain_operations: Vec<DomainOperation>) -> Vec<OperationRecord> {
        domain_operations.into_iter().map(Self::to_dto).collect()
    }

    pub fn listing_to_response(listing: OperationListing) -> OperationsResponse {
        OperationsResponse {
            solde: listing.balance,
            revenus: Self::to_dto_list(listing.income),
            depenses: Self::to_dto_list(listing.expenses),
            total_revenus: Some(listing.total_income as u64),
            total_depenses: Some(listing.total_expenses as u64),
        }
    }
}
