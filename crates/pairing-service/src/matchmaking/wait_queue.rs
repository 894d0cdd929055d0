//! FIFO wait queue for callers of a single role.

use crate::errors::PairingError;
use crate::models::Role;
use std::collections::VecDeque;

/// A caller waiting to be paired.
///
/// The channel is assigned at enqueue time; the partner that completes the
/// pair receives the same channel when it dequeues this entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingCaller {
    /// Opaque caller identifier. Not deduplicated: a caller that requests
    /// twice before being matched holds two independent entries.
    pub id: String,

    /// Role this caller arrived as.
    pub role: Role,

    /// Channel the caller is waiting on.
    pub channel: String,
}

/// Ordered sequence of waiting callers, FIFO.
#[derive(Debug, Default)]
pub struct WaitQueue {
    items: VecDeque<WaitingCaller>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append a caller to the tail.
    pub fn enqueue(&mut self, caller: WaitingCaller) {
        self.items.push_back(caller);
    }

    /// Remove and return the head (the oldest waiting caller).
    pub fn dequeue(&mut self) -> Result<WaitingCaller, PairingError> {
        self.items.pop_front().ok_or(PairingError::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Ordered caller ids, for diagnostic logging.
    pub fn peek_all(&self) -> Vec<String> {
        self.items.iter().map(|c| c.id.clone()).collect()
    }

    /// Channels currently held by waiting callers, for allocator
    /// collision avoidance.
    pub fn pending_channels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|c| c.channel.as_str())
    }

    /// Drop all entries, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.items.len();
        self.items.clear();
        dropped
    }
}
