//! Caller matchmaking core.
//!
//! Two FIFO wait queues (one per role), a collision-avoiding channel
//! allocator, an invalidation registry and the matchmaker that drives
//! them. All state is process-memory-resident and lost on restart.

pub mod channel_allocator;
pub mod invalidation_registry;
pub mod matchmaker;
pub mod wait_queue;

pub use channel_allocator::{ChannelAllocator, DEFAULT_CHANNEL_SPACE};
pub use invalidation_registry::InvalidationRegistry;
pub use matchmaker::{Matchmaker, PairingOutcome, QueueSnapshot};
pub use wait_queue::{WaitQueue, WaitingCaller};
