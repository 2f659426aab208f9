//! Discrete-event scheduler
//!
//! A min-heap of tick-stamped events. Two events on the same tick pop in
//! the order they were scheduled: every insertion takes a monotonically
//! increasing sequence number and the heap orders by (tick, seq).
//!
//! Events carry an owner. Cancelling a unit's events (on incapacitation)
//! leaves world-owned events untouched; a bullet already in the air does
//! not care that its shooter went down.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::core::error::{FirelineError, Result};
use crate::core::types::{OwnerId, Tick};
use crate::simulation::events::CombatEvent;

#[derive(Debug)]
pub struct QueuedEvent {
    pub tick: Tick,
    pub owner: OwnerId,
    pub event: CombatEvent,
    seq: u64,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.tick == other.tick && self.seq == other.seq
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.tick, self.seq).cmp(&(other.tick, other.seq))
    }
}

#[derive(Debug, Default)]
pub struct EventScheduler {
    heap: BinaryHeap<Reverse<QueuedEvent>>,
    next_seq: u64,
}

impl EventScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for a future (or current) tick
    ///
    /// Scheduling behind the clock is refused outright rather than
    /// clamped; a past-tick request means the caller's chain arithmetic
    /// is wrong and clamping would hide it.
    pub fn schedule(
        &mut self,
        now: Tick,
        tick: Tick,
        owner: OwnerId,
        event: CombatEvent,
    ) -> Result<()> {
        if tick < now {
            return Err(FirelineError::PastTick { tick, now });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(QueuedEvent {
            tick,
            owner,
            event,
            seq,
        }));
        Ok(())
    }

    /// Pop the earliest event due at or before `now`, in (tick, seq) order
    pub fn pop_due(&mut self, now: Tick) -> Option<QueuedEvent> {
        match self.heap.peek() {
            Some(Reverse(queued)) if queued.tick <= now => {
                self.heap.pop().map(|Reverse(queued)| queued)
            }
            _ => None,
        }
    }

    /// Remove every event owned by a unit; world-owned events survive
    ///
    /// Returns the number of events removed.
    pub fn cancel_for_owner(&mut self, owner: OwnerId) -> usize {
        if owner == OwnerId::World {
            return 0;
        }
        let before = self.heap.len();
        let kept: Vec<_> = std::mem::take(&mut self.heap)
            .into_iter()
            .filter(|Reverse(queued)| queued.owner != owner)
            .collect();
        self.heap = kept.into();
        before - self.heap.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
