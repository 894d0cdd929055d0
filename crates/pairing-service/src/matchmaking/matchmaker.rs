//! The matchmaker: pairs callers or enqueues them.
//!
//! Owns both wait queues and the channel allocator. The whole
//! check-then-mutate sequence for one request runs under a single lock so
//! two concurrent opposite-role requests can neither both enqueue nor
//! dequeue the same entry twice. Critical sections are short, in-memory
//! and free of I/O and `.await`.

use crate::errors::PairingError;
use crate::matchmaking::{ChannelAllocator, InvalidationRegistry, WaitQueue, WaitingCaller};
use crate::models::{FlushCounts, Role};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Result of one `request_channel` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingOutcome {
    /// No opposite-role caller was waiting; the caller was enqueued and
    /// holds the channel it will be joined on once a partner arrives.
    /// The service never pushes a notification to a waiting caller; the
    /// waiting side polls or re-requests (pull-based contract).
    Enqueued {
        /// Channel assigned to the now-waiting caller.
        channel: String,
    },

    /// An opposite-role caller was waiting; the pair is complete and both
    /// members hold the same channel.
    Paired {
        /// Channel shared by both members of the pair.
        channel: String,
        /// Volunteer member of the pair.
        volunteer_id: String,
        /// Beneficiary member of the pair.
        beneficiary_id: String,
    },
}

impl PairingOutcome {
    /// Channel returned to the requesting caller in either case.
    pub fn channel(&self) -> &str {
        match self {
            PairingOutcome::Enqueued { channel } | PairingOutcome::Paired { channel, .. } => {
                channel
            }
        }
    }
}

/// Ordered caller ids per queue, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub volunteers: Vec<String>,
    pub beneficiaries: Vec<String>,
}

/// Both wait queues, guarded together by one mutex.
#[derive(Debug, Default)]
struct MatchState {
    volunteers: WaitQueue,
    beneficiaries: WaitQueue,
}

impl MatchState {
    fn queue_mut(&mut self, role: Role) -> &mut WaitQueue {
        match role {
            Role::Volunteer => &mut self.volunteers,
            Role::Beneficiary => &mut self.beneficiaries,
        }
    }

    fn queue(&self, role: Role) -> &WaitQueue {
        match role {
            Role::Volunteer => &self.volunteers,
            Role::Beneficiary => &self.beneficiaries,
        }
    }
}

/// Pairs waiting callers into shared channels.
pub struct Matchmaker {
    state: Mutex<MatchState>,
    allocator: ChannelAllocator,
    registry: Arc<InvalidationRegistry>,
}

impl Matchmaker {
    /// Create a matchmaker with empty queues.
    ///
    /// The invalidation registry is shared: the allocator reads it for
    /// collision avoidance while the invalidate/validate endpoints mutate
    /// and query it independently.
    pub fn new(channel_space: u64, registry: Arc<InvalidationRegistry>) -> Self {
        Self {
            state: Mutex::new(MatchState::default()),
            allocator: ChannelAllocator::new(channel_space),
            registry,
        }
    }

    /// Pair the caller with the oldest opposite-role waiter, or enqueue it.
    ///
    /// Invariant maintained: whenever one queue is non-empty, a request
    /// for the opposite role always pairs and never enqueues, so the two
    /// queues are never simultaneously non-empty. Repeated calls with the
    /// same id produce independent entries (no deduplication).
    pub fn request_channel(
        &self,
        caller_id: &str,
        role: Role,
    ) -> Result<PairingOutcome, PairingError> {
        let mut state = self.state.lock();

        let outcome = if state.queue(role.opposite()).is_empty() {
            // Candidate must not collide with a channel some waiting
            // caller already holds. Only one queue can be non-empty here,
            // but collecting both keeps the check independent of that.
            let pending: HashSet<&str> = state
                .volunteers
                .pending_channels()
                .chain(state.beneficiaries.pending_channels())
                .collect();
            let channel = self.allocator.allocate(&self.registry, &pending)?;

            state.queue_mut(role).enqueue(WaitingCaller {
                id: caller_id.to_string(),
                role,
                channel: channel.clone(),
            });
            PairingOutcome::Enqueued { channel }
        } else {
            let partner = state.queue_mut(role.opposite()).dequeue()?;
            let (volunteer_id, beneficiary_id) = match role {
                Role::Volunteer => (caller_id.to_string(), partner.id),
                Role::Beneficiary => (partner.id, caller_id.to_string()),
            };
            PairingOutcome::Paired {
                channel: partner.channel,
                volunteer_id,
                beneficiary_id,
            }
        };

        debug!(
            volunteers = ?state.volunteers.peek_all(),
            beneficiaries = ?state.beneficiaries.peek_all(),
            "queues after request"
        );

        Ok(outcome)
    }

    /// Clear both queues (administrative flush).
    ///
    /// Does not touch the invalidation registry.
    pub fn flush(&self) -> FlushCounts {
        let mut state = self.state.lock();
        FlushCounts {
            volunteers: state.volunteers.clear(),
            beneficiaries: state.beneficiaries.clear(),
        }
    }

    /// Current queue contents, for diagnostics and metrics.
    pub fn queue_snapshot(&self) -> QueueSnapshot {
        let state = self.state.lock();
        QueueSnapshot {
            volunteers: state.volunteers.peek_all(),
            beneficiaries: state.beneficiaries.peek_all(),
        }
    }

    /// Per-role queue depths.
    pub fn queue_depths(&self) -> (usize, usize) {
        let state = self.state.lock();
        (state.volunteers.len(), state.beneficiaries.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn matchmaker() -> Matchmaker {
        Matchmaker::new(
            crate::matchmaking::DEFAULT_CHANNEL_SPACE,
            Arc::new(InvalidationRegistry::new()),
        )
    }

    #[test]
    fn test_first_caller_is_enqueued_with_a_channel() {
        let mm = matchmaker();

        let outcome = mm.request_channel("v1", Role::Volunteer).unwrap();
        assert!(matches!(outcome, PairingOutcome::Enqueued { .. }));
        assert_eq!(mm.queue_depths(), (1, 0));
    }

    #[test]
    fn test_pair_members_share_the_channel() {
        let mm = matchmaker();

        let first = mm.request_channel("v1", Role::Volunteer).unwrap();
        let second = mm.request_channel("b1", Role::Beneficiary).unwrap();

        assert_eq!(first.channel(), second.channel());
        match second {
            PairingOutcome::Paired {
                volunteer_id,
                beneficiary_id,
                ..
            } => {
                assert_eq!(volunteer_id, "v1");
                assert_eq!(beneficiary_id, "b1");
            }
            PairingOutcome::Enqueued { .. } => panic!("second caller must pair"),
        }
        assert_eq!(mm.queue_depths(), (0, 0));
    }

    #[test]
    fn test_fifo_fairness() {
        let mm = matchmaker();

        let v1 = mm.request_channel("v1", Role::Volunteer).unwrap();
        let v2 = mm.request_channel("v2", Role::Volunteer).unwrap();

        let b1 = mm.request_channel("b1", Role::Beneficiary).unwrap();
        match &b1 {
            PairingOutcome::Paired { volunteer_id, .. } => assert_eq!(volunteer_id, "v1"),
            PairingOutcome::Enqueued { .. } => panic!("b1 must pair"),
        }
        assert_eq!(b1.channel(), v1.channel());

        let b2 = mm.request_channel("b2", Role::Beneficiary).unwrap();
        match &b2 {
            PairingOutcome::Paired { volunteer_id, .. } => assert_eq!(volunteer_id, "v2"),
            PairingOutcome::Enqueued { .. } => panic!("b2 must pair"),
        }
        assert_eq!(b2.channel(), v2.channel());
    }

    #[test]
    fn test_queues_never_simultaneously_non_empty() {
        let mm = matchmaker();

        mm.request_channel("v1", Role::Volunteer).unwrap();
        mm.request_channel("v2", Role::Volunteer).unwrap();
        mm.request_channel("b1", Role::Beneficiary).unwrap();

        // b1 paired with v1; only the volunteer queue may hold entries.
        let (volunteers, beneficiaries) = mm.queue_depths();
        assert_eq!((volunteers, beneficiaries), (1, 0));

        mm.request_channel("b2", Role::Beneficiary).unwrap();
        mm.request_channel("b3", Role::Beneficiary).unwrap();
        let (volunteers, beneficiaries) = mm.queue_depths();
        assert_eq!((volunteers, beneficiaries), (0, 1));
    }

    #[test]
    fn test_caller_count_conservation() {
        let mm = matchmaker();

        // 3 volunteers, 1 beneficiary: one pair forms, two volunteers wait.
        mm.request_channel("v1", Role::Volunteer).unwrap();
        mm.request_channel("v2", Role::Volunteer).unwrap();
        mm.request_channel("v3", Role::Volunteer).unwrap();
        mm.request_channel("b1", Role::Beneficiary).unwrap();

        assert_eq!(mm.queue_depths(), (2, 0));
    }

    #[test]
    fn test_repeated_id_is_not_deduplicated() {
        let mm = matchmaker();

        let first = mm.request_channel("v1", Role::Volunteer).unwrap();
        let second = mm.request_channel("v1", Role::Volunteer).unwrap();

        // Two independent entries with distinct channels.
        assert_ne!(first.channel(), second.channel());
        assert_eq!(mm.queue_depths(), (2, 0));

        // Both entries pair, in arrival order.
        let b1 = mm.request_channel("b1", Role::Beneficiary).unwrap();
        let b2 = mm.request_channel("b2", Role::Beneficiary).unwrap();
        assert_eq!(b1.channel(), first.channel());
        assert_eq!(b2.channel(), second.channel());
    }

    #[test]
    fn test_allocator_never_returns_invalidated_channel() {
        let registry = Arc::new(InvalidationRegistry::new());
        registry.invalidate("0");
        registry.invalidate("1");
        // Space of 3 with two identifiers invalidated: only "2" remains.
        let mm = Matchmaker::new(3, Arc::clone(&registry));

        let outcome = mm.request_channel("v1", Role::Volunteer).unwrap();
        assert_eq!(outcome.channel(), "2");
    }

    #[test]
    fn test_flush_empties_both_queues() {
        let mm = matchmaker();
        mm.request_channel("v1", Role::Volunteer).unwrap();
        mm.request_channel("v2", Role::Volunteer).unwrap();

        let counts = mm.flush();
        assert_eq!(counts.volunteers, 2);
        assert_eq!(counts.beneficiaries, 0);
        assert_eq!(mm.queue_depths(), (0, 0));

        // Post-flush behaves as freshly started: next caller enqueues.
        let outcome = mm.request_channel("b1", Role::Beneficiary).unwrap();
        assert!(matches!(outcome, PairingOutcome::Enqueued { .. }));
    }

    #[test]
    fn test_queue_snapshot_orders_ids() {
        let mm = matchmaker();
        mm.request_channel("v1", Role::Volunteer).unwrap();
        mm.request_channel("v2", Role::Volunteer).unwrap();

        let snapshot = mm.queue_snapshot();
        assert_eq!(
            snapshot.volunteers,
            vec!["v1".to_string(), "v2".to_string()]
        );
        assert!(snapshot.beneficiaries.is_empty());
    }

    #[test]
    fn test_concurrent_requests_pair_exactly_twice_per_channel() {
        use std::collections::HashMap;
        use std::thread;

        let mm = Arc::new(matchmaker());
        let per_role = 16;

        let mut handles = Vec::new();
        for i in 0..per_role {
            let mm_v = Arc::clone(&mm);
            handles.push(thread::spawn(move || {
                mm_v.request_channel(&format!("v{i}"), Role::Volunteer)
                    .unwrap()
                    .channel()
                    .to_string()
            }));
            let mm_b = Arc::clone(&mm);
            handles.push(thread::spawn(move || {
                mm_b.request_channel(&format!("b{i}"), Role::Beneficiary)
                    .unwrap()
                    .channel()
                    .to_string()
            }));
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for handle in handles {
            let channel = handle.join().expect("worker thread panicked");
            *counts.entry(channel).or_insert(0) += 1;
        }

        // Every caller got exactly one channel; each allocated value was
        // returned exactly twice, once per pair member.
        for (channel, count) in &counts {
            assert_eq!(*count, 2, "channel {channel} returned {count} times");
        }
        assert_eq!(counts.len(), per_role);

        // Equal role counts: everything paired, both queues drained.
        assert_eq!(mm.queue_depths(), (0, 0));
    }
}
