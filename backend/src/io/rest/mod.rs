//! # REST API Interface Layer
//!
//! Axum handlers for `/api/operations` and `/api/logs`. Domain errors are
//! translated here into status codes with an `{"error": ...}` body.

pub mod logging_apis;
pub mod mappers;
pub mod operation_apis;
