//! Pairing Service Library
//!
//! Pairs volunteer and beneficiary callers into shared communication
//! channels and issues time-limited channel access tokens.
//!
//! # Core flow
//!
//! An incoming caller request reaches the [`matchmaking::Matchmaker`],
//! which consults the opposite-role wait queue: either the caller pairs
//! immediately with the oldest waiter (and receives the waiter's channel)
//! or it is enqueued with a freshly allocated channel. A separate
//! invalidation registry tracks channels that must no longer be joined
//! after one party leaves.
//!
//! # Known limitations (by design, inherited from the protocol)
//!
//! - A waiting caller is never notified when its partner arrives; clients
//!   poll or re-request (pull-based contract).
//! - Queue entries never expire; an abandoned caller waits until an
//!   administrative flush.
//! - Repeated requests with the same caller id create independent queue
//!   entries.
//! - All state is process-memory-resident and lost on restart.
//!
//! # Modules
//!
//! - [`matchmaking`] - Wait queues, channel allocator, invalidation
//!   registry, matchmaker
//! - [`services`] - Stateless channel token issuance
//! - [`handlers`] / [`routes`] - HTTP surface
//! - [`config`] - Service configuration from environment
//! - [`errors`] - Error types with HTTP status mapping

pub mod config;
pub mod errors;
pub mod handlers;
pub mod matchmaking;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
