//! HTTP request handlers for the pairing service.

pub mod admin;
pub mod callers;
pub mod channels;
pub mod health;
pub mod metrics;
pub mod tokens;

pub use admin::flush_queues;
pub use callers::new_caller;
pub use channels::{invalidate_channel, validate_channel};
pub use health::health_check;
pub use metrics::metrics_handler;
pub use tokens::access_token;
