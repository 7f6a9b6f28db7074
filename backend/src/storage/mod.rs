//! # Storage Module
//!
//! Persistence behind the `OperationStorage` trait. Only an in-memory
//! implementation exists.

pub mod memory;
pub mod traits;

pub use memory::InMemoryOperationStorage;
pub use traits::OperationStorage;
