// core/timer.rs
//
// Arena of one-shot timers keyed by handle, with virtual-time deadlines.
// Every scheduled callback in the engine (element removal, staggered burst
// release) lives in one of these registries, so stop()/destroy() can
// enumerate and cancel everything deterministically.

use std::collections::HashMap;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// One-shot timer registry. `T` is the payload delivered when the timer
/// fires (an element to remove, a burst spawn to release).
#[derive(Debug)]
pub struct TimerRegistry<T> {
    timers: HashMap<TimerId, (f64, T)>,
    next_id: u32,
}

impl<T> TimerRegistry<T> {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedule a timer at an absolute virtual-time deadline.
    pub fn schedule(&mut self, deadline: f64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, (deadline, payload));
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Remove and return all timers whose deadline has passed.
    ///
    /// Due ids are collected as a snapshot before any removal, so callers
    /// may cancel other timers (or schedule new ones) while handling the
    /// returned payloads.
    pub fn drain_due(&mut self, now: f64) -> Vec<(TimerId, T)> {
        let due: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .map(|(&id, _)| id)
            .collect();
        due.into_iter()
            .filter_map(|id| self.timers.remove(&id).map(|(_, payload)| (id, payload)))
            .collect()
    }

    /// Deadline of a pending timer, if still scheduled.
    pub fn deadline(&self, id: TimerId) -> Option<f64> {
        self.timers.get(&id).map(|(deadline, _)| *deadline)
    }

    /// Cancel every outstanding timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_deadline() {
        let mut reg = TimerRegistry::new();
        reg.schedule(1.0, "a");
        reg.schedule(2.0, "b");

        let due = reg.drain_due(1.5);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, "a");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut reg = TimerRegistry::new();
        let id = reg.schedule(1.0, "a");
        assert!(reg.cancel(id));
        assert!(reg.drain_due(2.0).is_empty());
    }

    #[test]
    fn cancel_twice_is_a_no_op() {
        let mut reg = TimerRegistry::new();
        let id = reg.schedule(1.0, "a");
        assert!(reg.cancel(id));
        assert!(!reg.cancel(id));
    }

    #[test]
    fn drained_timers_do_not_fire_again() {
        let mut reg = TimerRegistry::new();
        reg.schedule(1.0, "a");
        assert_eq!(reg.drain_due(2.0).len(), 1);
        assert!(reg.drain_due(3.0).is_empty());
    }

    #[test]
    fn clear_cancels_everything() {
        let mut reg = TimerRegistry::new();
        reg.schedule(1.0, "a");
        reg.schedule(2.0, "b");
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.drain_due(10.0).is_empty());
    }

    #[test]
    fn ids_are_not_reused() {
        let mut reg = TimerRegistry::new();
        let a = reg.schedule(1.0, "a");
        reg.cancel(a);
        let b = reg.schedule(1.0, "b");
        assert_ne!(a, b);
    }
}
