//! Observability module for the pairing service.
//!
//! Provides metrics definitions and recording helpers.

pub mod metrics;
