//! Virtual clock and cancellable timers
//!
//! Nothing here sleeps. The owner moves time forward with `pop_due` and
//! `advance_clock`, which lets the terminal front end feed real elapsed time
//! while tests and headless play jump straight to the next deadline.

use log::trace;
use sorted_vec::SortedVec;

/// Handle used to cancel or inspect a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a timer drives when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Decorative reel update during a spin
    ReelTick,
    /// End of the spin window
    SpinComplete,
    /// Passive energy regeneration
    EnergyRecovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Repeat {
    Once,
    Every(u64),
}

/// A queued timer, ordered by due time and then by arming order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: u64,
    seq: u64,
    id: TimerId,
    kind: TimerKind,
    repeat: Repeat,
}

/// A timer that has come due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Virtual time the timer fired at, in milliseconds
    pub at: u64,
}

#[derive(Debug)]
pub struct Scheduler {
    /// Current virtual time in milliseconds
    now: u64,
    /// Sequence counter shared by timer ids and arming order
    next_seq: u64,
    queue: SortedVec<Entry>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: SortedVec::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn arm(&mut self, due: u64, id: TimerId, kind: TimerKind, repeat: Repeat) {
        let seq = self.bump_seq();
        self.queue.insert(Entry {
            due,
            seq,
            id,
            kind,
            repeat,
        });
    }

    fn schedule(&mut self, delay_ms: u64, kind: TimerKind, repeat: Repeat) -> TimerId {
        let id = TimerId(self.next_seq);
        let due = self.now.saturating_add(delay_ms);
        self.arm(due, id, kind, repeat);
        trace!("Armed {:?} timer {:?} for t={}ms", kind, id, due);
        id
    }

    /// Fire once after `delay_ms`
    pub fn schedule_once(&mut self, delay_ms: u64, kind: TimerKind) -> TimerId {
        self.schedule(delay_ms, kind, Repeat::Once)
    }

    /// Fire every `interval_ms`, starting one interval from now
    pub fn schedule_every(&mut self, interval_ms: u64, kind: TimerKind) -> TimerId {
        self.schedule(interval_ms, kind, Repeat::Every(interval_ms.max(1)))
    }

    /// Cancel a timer. Returns false if it was not armed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.queue.iter().position(|entry| entry.id == id) {
            Some(index) => {
                let entry = self.queue.remove_index(index);
                trace!("Cancelled {:?} timer {:?}", entry.kind, id);
                true
            }
            None => false,
        }
    }

    /// Cancel every armed timer, returning how many were removed
    pub fn cancel_all(&mut self) -> usize {
        let removed = self.queue.len();
        self.queue = SortedVec::new();
        removed
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.queue.iter().any(|entry| entry.id == id)
    }

    /// Next virtual time the given timer fires at
    pub fn due_time(&self, id: TimerId) -> Option<u64> {
        self.queue
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.due)
    }

    /// Due time of the earliest armed timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.queue.first().map(|entry| entry.due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time. Repeating timers are re-armed before being returned so
    /// the caller may cancel them while handling the tick.
    pub fn pop_due(&mut self, until: u64) -> Option<FiredTimer> {
        if self.queue.first()?.due > until {
            return None;
        }
        let entry = self.queue.remove_index(0);
        self.now = self.now.max(entry.due);
        if let Repeat::Every(interval) = entry.repeat {
            // A repeat past the end of the clock would never fire
            if let Some(next) = entry.due.checked_add(interval) {
                self.arm(next, entry.id, entry.kind, entry.repeat);
            }
        }
        Some(FiredTimer {
            id: entry.id,
            kind: entry.kind,
            at: entry.due,
        })
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: u64) {
        self.now = self.now.max(to);
    }
}
