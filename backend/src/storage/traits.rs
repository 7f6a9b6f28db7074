//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so that the in-memory store
//! can be swapped for another backend without touching the services.

use anyhow::Result;
use async_trait::async_trait;
use shared::OperationKind;

use crate::domain::models::operation::{DomainOperation, NewOperation};

#[async_trait]
pub trait OperationStorage: Send + Sync {
    /// Store a new operation and return it with its assigned id.
    /// Ids are unique across both kinds.
    async fn insert_operation(&self, operation: NewOperation) -> Result<DomainOperation>;

    async fn get_operation(&self, id: u64) -> Result<Option<DomainOperation>>;

    /// All operations of one kind, most recent first
    async fn list_operations(&self, kind: OperationKind) -> Result<Vec<DomainOperation>>;

    /// Replace a stored operation. Returns false when the id is unknown.
    async fn update_operation(&self, operation: &DomainOperation) -> Result<bool>;

    /// Returns false when the id is unknown
    async fn delete_operation(&self, id: u64) -> Result<bool>;
}
