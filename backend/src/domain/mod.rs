//! # Domain Module
//!
//! Rules of the operations API: validation of incoming operations, defaults
//! for missing labels, pagination and the overall balance.

pub mod commands;
pub mod models;
pub mod operation_service;

pub use models::operation::OperationError;
pub use operation_service::OperationService;
