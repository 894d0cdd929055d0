//! Registry of channel identifiers that must no longer be joined.
//!
//! Once a party leaves a channel the channel is invalidated here and can
//! never again be reported valid or handed out by the allocator. The set
//! grows monotonically for the lifetime of the process (no expiry); all
//! state is lost on restart by design.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Set of invalidated channel identifiers.
///
/// Shared read/write state: written only by `invalidate`, read by the
/// validate endpoint and by the allocator for collision avoidance.
#[derive(Debug, Default)]
pub struct InvalidationRegistry {
    channels: RwLock<HashSet<String>>,
}

impl InvalidationRegistry {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashSet::new()),
        }
    }

    /// Mark a channel unusable. Idempotent, never fails.
    pub fn invalidate(&self, channel: &str) {
        self.channels.write().insert(channel.to_string());
    }

    /// Returns false iff the channel has been invalidated.
    pub fn is_valid(&self, channel: &str) -> bool {
        !self.channels.read().contains(channel)
    }

    /// Number of invalidated channels, for diagnostics and metrics.
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.read().is_empty()
    }
}
