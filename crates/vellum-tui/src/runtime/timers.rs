//! Timer queue.
//!
//! A min-heap of scheduled [`TimerEvent`]s ordered by deadline, with an
//! insertion sequence breaking ties so same-instant timers fire in the
//! order they were scheduled. Nothing is ever cancelled; handlers detect
//! staleness themselves.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::events::TimerEvent;

#[derive(Debug)]
struct Entry {
    deadline: Instant,
    seq: u64,
    event: TimerEvent,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Entry) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Entry) -> std::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Entry) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending scheduled events.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> TimerQueue {
        TimerQueue::default()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn schedule(&mut self, after: Duration, event: TimerEvent) {
        self.schedule_at(Instant::now() + after, event);
    }

    pub fn schedule_at(&mut self, deadline: Instant, event: TimerEvent) {
        self.heap.push(Reverse(Entry {
            deadline,
            seq: self.seq,
            event,
        }));
        self.seq += 1;
    }

    /// Deadline of the soonest pending timer, for the poll timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Pops the soonest timer if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerEvent> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal(upto: usize) -> TimerEvent {
        TimerEvent::Reveal {
            id: crate::events::TypewriterId::title(0),
            upto,
        }
    }

    #[test]
    fn test_pop_due_orders_by_deadline() {
        let mut timers = TimerQueue::new();
        let base = Instant::now();
        timers.schedule_at(base + Duration::from_millis(20), reveal(1));
        timers.schedule_at(base + Duration::from_millis(10), reveal(0));

        let now = base + Duration::from_millis(30);
        assert_eq!(timers.pop_due(now), Some(reveal(0)));
        assert_eq!(timers.pop_due(now), Some(reveal(1)));
        assert_eq!(timers.pop_due(now), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_not_yet_due_timers_stay_queued() {
        let mut timers = TimerQueue::new();
        let base = Instant::now();
        timers.schedule_at(base + Duration::from_millis(50), reveal(0));

        assert_eq!(timers.pop_due(base), None);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(base + Duration::from_millis(50)));
    }

    #[test]
    fn test_same_deadline_fires_in_schedule_order() {
        let mut timers = TimerQueue::new();
        let deadline = Instant::now();
        timers.schedule_at(deadline, reveal(0));
        timers.schedule_at(deadline, reveal(1));
        timers.schedule_at(deadline, reveal(2));

        assert_eq!(timers.pop_due(deadline), Some(reveal(0)));
        assert_eq!(timers.pop_due(deadline), Some(reveal(1)));
        assert_eq!(timers.pop_due(deadline), Some(reveal(2)));
    }
}
