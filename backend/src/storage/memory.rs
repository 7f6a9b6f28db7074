//! In-memory operation store. Contents are lost when the server stops.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use shared::OperationKind;
use tokio::sync::RwLock;

use crate::domain::models::operation::{DomainOperation, NewOperation};
use crate::storage::traits::OperationStorage;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: u64,
    operations: BTreeMap<u64, DomainOperation>,
}

#[derive(Debug, Default)]
pub struct InMemoryOperationStorage {
    state: RwLock<MemoryState>,
}

impl InMemoryOperationStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OperationStorage for InMemoryOperationStorage {
    async fn insert_operation(&self, operation: NewOperation) -> Result<DomainOperation> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let stored = DomainOperation {
            id: state.last_id,
            kind: operation.kind,
            amount: operation.amount,
            label: operation.label,
            details: operation.details,
            created_at: operation.created_at,
            updated_at: operation.created_at,
        };
        state.operations.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn get_operation(&self, id: u64) -> Result<Option<DomainOperation>> {
        Ok(self.state.read().await.operations.get(&id).cloned())
    }

    async fn list_operations(&self, kind: OperationKind) -> Result<Vec<DomainOperation>> {
        let state = self.state.read().await;
        let mut operations: Vec<DomainOperation> = state
            .operations
            .values()
            .filter(|operation| operation.kind == kind)
            .cloned()
            .collect();

        operations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(operations)
    }

    async fn update_operation(&self, operation: &DomainOperation) -> Result<bool> {
        let mut state = self.state.write().await;
        match state.operations.get_mut(&operation.id) {
            Some(stored) => {
                *stored = operation.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_operation(&self, id: u64) -> Result<bool> {
        Ok(self.state.write().await.operations.remove(&id).is_some())
    }
}
