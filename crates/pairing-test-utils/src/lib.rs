//! Test utilities for the pairing service.
//!
//! Provides [`TestPairingServer`] for spawning real server instances in
//! integration tests.

pub mod server_harness;

pub use server_harness::TestPairingServer;
