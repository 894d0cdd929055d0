//! Service-layer logic.

pub mod token_service;
