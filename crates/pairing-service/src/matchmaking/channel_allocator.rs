//! Channel identifier allocation.
//!
//! Channel identifiers are decimal strings sampled uniformly from a
//! configured numeric space. Collision safety between live channels comes
//! from range sizing, not from tracking every identifier ever issued: the
//! allocator only rejects candidates that are invalidated or currently
//! assigned to a waiting caller.

use crate::errors::PairingError;
use crate::matchmaking::InvalidationRegistry;
use ring::rand::{SecureRandom, SystemRandom};
use std::collections::HashSet;

/// Default channel identifier space (10^10).
///
/// Several orders of magnitude larger than any expected concurrent-pair
/// volume, so birthday collisions between live channels are negligible.
pub const DEFAULT_CHANNEL_SPACE: u64 = 10_000_000_000;

/// Resampling budget before allocation gives up.
///
/// Only reachable if the invalidation registry covers almost the whole
/// configured space, which indicates a misconfigured (tiny) space.
const MAX_ALLOCATION_ATTEMPTS: usize = 128;

/// Generates unique, collision-free channel identifiers.
#[derive(Debug)]
pub struct ChannelAllocator {
    rng: SystemRandom,
    channel_space: u64,
}

impl ChannelAllocator {
    /// Create an allocator drawing from `0..channel_space`.
    pub fn new(channel_space: u64) -> Self {
        Self {
            rng: SystemRandom::new(),
            channel_space,
        }
    }

    /// Allocate a fresh channel identifier.
    ///
    /// Rejection-samples until the candidate is neither invalidated nor a
    /// member of `pending` (channels held by currently waiting callers).
    pub fn allocate(
        &self,
        registry: &InvalidationRegistry,
        pending: &HashSet<&str>,
    ) -> Result<String, PairingError> {
        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let candidate = self.sample()?.to_string();
            if registry.is_valid(&candidate) && !pending.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }

        Err(PairingError::Allocation(format!(
            "no free identifier found in {MAX_ALLOCATION_ATTEMPTS} attempts; \
             channel space {} is too small for the invalidation registry",
            self.channel_space
        )))
    }

    /// Uniform sample from `0..channel_space`.
    ///
    /// Discards raw values above the largest multiple of the space to
    /// avoid modulo bias; with any realistic space the discard probability
    /// is vanishingly small, so the inner loop terminates immediately in
    /// practice.
    fn sample(&self) -> Result<u64, PairingError> {
        // Largest multiple of channel_space representable in u64.
        let bound = u64::MAX - (u64::MAX % self.channel_space);
        loop {
            let mut bytes = [0u8; 8];
            self.rng
                .fill(&mut bytes)
                .map_err(|_| PairingError::Allocation("CSPRNG failure".to_string()))?;
            let raw = u64::from_le_bytes(bytes);
            if raw < bound {
                return Ok(raw % self.channel_space);
            }
        }
    }
}
