//! # IO Module
//!
//! HTTP boundary of the budget API: JSON bodies in, domain commands to the
//! services, domain results back out as the wire records the dashboard reads.

pub mod rest;
