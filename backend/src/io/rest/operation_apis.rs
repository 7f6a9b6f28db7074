//! # REST API for Operations
//!
//! CRUD endpoints for incomes and expenses under `/api/operations`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::Value;
use shared::{ErrorResponse, MessageResponse};
use tracing::{error, info, warn};

use crate::domain::commands::{CreateOperationCommand, ListOperationsQuery, UpdateOperationCommand};
use crate::domain::models::operation::AmountField;
use crate::domain::OperationError;
use crate::io::rest::mappers::OperationMapper;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OperationListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Body of a create or update request. The amount is kept raw so that
/// numeric strings are accepted and garbage is reported as `Invalid amount`.
#[derive(Debug, Default, Deserialize)]
pub struct OperationPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub montant: Option<Value>,
    pub source: Option<String>,
    pub categorie: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl OperationPayload {
    fn into_create_command(self) -> CreateOperationCommand {
        CreateOperationCommand {
            kind: self.kind,
            amount: AmountField::from_json(self.montant.as_ref()),
            source: self.source,
            categorie: self.categorie,
            description: self.description,
            notes: self.notes,
        }
    }

    fn into_update_command(self) -> UpdateOperationCommand {
        UpdateOperationCommand {
            amount: AmountField::from_json(self.montant.as_ref()),
            source: self.source,
            categorie: self.categorie,
            description: self.description,
            notes: self.notes,
        }
    }
}

fn error_response(err: OperationError) -> Response {
    let status = match &err {
        OperationError::MissingType | OperationError::InvalidType | OperationError::InvalidAmount => {
            StatusCode::BAD_REQUEST
        }
        OperationError::NotFound => StatusCode::NOT_FOUND,
        OperationError::Storage(e) => {
            error!("Storage failure: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse { error: err.to_string() })).into_response()
}

/// List both kinds, each page newest first, with the overall balance
pub async fn list_operations(
    State(state): State<AppState>,
    Query(query): Query<OperationListQuery>,
) -> impl IntoResponse {
    info!("GET /api/operations - query: {:?}", query);

    let query = ListOperationsQuery::new(query.page, query.per_page);
    match state.operation_service.list_operations(query).await {
        Ok(listing) => (StatusCode::OK, Json(OperationMapper::listing_to_response(listing))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_operation(
    State(state): State<AppState>,
    Json(payload): Json<OperationPayload>,
) -> impl IntoResponse {
    info!("POST /api/operations - payload: {:?}", payload);

    match state.operation_service.create_operation(payload.into_create_command()).await {
        Ok(operation) => (StatusCode::CREATED, Json(OperationMapper::to_dto(operation))).into_response(),
        Err(e) => {
            warn!("Rejected operation: {}", e);
            error_response(e)
        }
    }
}

pub async fn get_operation(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("GET /api/operations/{}", id);

    match state.operation_service.get_operation(&id).await {
        Ok(operation) => (StatusCode::OK, Json(OperationMapper::to_dto(operation))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_operation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<OperationPayload>,
) -> impl IntoResponse {
    info!("PUT /api/operations/{} - payload: {:?}", id, payload);

    match state
        .operation_service
        .update_operation(&id, payload.into_update_command())
        .await
    {
        Ok(operation) => (StatusCode::OK, Json(OperationMapper::to_dto(operation))).into_response(),
        Err(e) => {
            warn!("Failed to update operation {}: {}", id, e);
            error_response(e)
        }
    }
}

pub async fn delete_operation(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    info!("DELETE /api/operations/{}", id);

    match state.operation_service.delete_operation(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Operation deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
