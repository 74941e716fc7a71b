//! Deferred event queue driven by game time.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use combat_core::{CombatEvent, CombatEventKind, EventSink};
use tracing::trace;

type Subscriber = Box<dyn FnMut(&CombatEvent)>;

/// Event queue with per-kind subscribers.
///
/// Published events wait until their delay has elapsed in game time, then are
/// handed out by [`advance`](Self::advance) ordered by due time and, for equal
/// due times, by publish order. An event published without a delay is due
/// immediately and goes out on the next `advance` or `flush`.
pub struct EventQueue {
    now: Duration,
    seq: u64,
    pending: BTreeMap<(Duration, u64), CombatEvent>,
    subscribers: HashMap<CombatEventKind, Vec<Subscriber>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            pending: BTreeMap::new(),
            subscribers: HashMap::new(),
        }
    }

    /// Registers `handler` for every delivered event of `kind`.
    pub fn subscribe<F>(&mut self, kind: CombatEventKind, handler: F)
    where
        F: FnMut(&CombatEvent) + 'static,
    {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Game time seen by the queue.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending events of `kind`, due or not.
    pub fn pending_count(&self, kind: CombatEventKind) -> usize {
        self.pending
            .values()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Moves game time forward by `dt` seconds and delivers everything due.
    ///
    /// A negative or non-finite `dt` delivers without moving time.
    pub fn advance(&mut self, dt: f32) -> Vec<CombatEvent> {
        if let Ok(step) = Duration::try_from_secs_f32(dt) {
            self.now += step;
        }
        self.flush()
    }

    /// Delivers everything due at the current time without moving time.
    pub fn flush(&mut self) -> Vec<CombatEvent> {
        let later = self.pending.split_off(&(self.now, u64::MAX));
        let due = std::mem::replace(&mut self.pending, later);

        let mut delivered = Vec::with_capacity(due.len());
        for (_, event) in due {
            trace!(kind = %event.kind(), now = ?self.now, "event delivered");
            if let Some(handlers) = self.subscribers.get_mut(&event.kind()) {
                for handler in handlers.iter_mut() {
                    handler(&event);
                }
            }
            delivered.push(event);
        }
        delivered
    }

    /// Drops every pending event; subscribers stay registered.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventQueue {
    fn publish(&mut self, event: CombatEvent, delay: Option<Duration>) {
        let due = self.now + delay.unwrap_or_default();
        trace!(kind = %event.kind(), ?due, "event queued");
        self.pending.insert((due, self.seq), event);
        self.seq += 1;
    }
}
