//! Deterministic one-shot timer queue.
//!
//! Time is logical: it only moves when the owner calls
//! [`EventLoop::pop_due`] or [`EventLoop::settle_at`]. Actions due at the
//! same instant run in scheduling order.

use std::collections::BTreeMap;
use std::time::Duration;

use disaster_map_event_models::EventId;

/// Work the controller runs when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Run [`crate::App::bootstrap`].
    Bootstrap,
    /// Show the details of an event.
    ShowDetails(EventId),
}

/// Pending one-shot actions ordered by due time, plus the logical clock.
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), ScheduledAction>,
}

impl EventLoop {
    /// Current logical time, measured from the loop's creation.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `action` to run `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, action: ScheduledAction) {
        let due = self.now + delay;
        self.queue.insert((due, self.next_seq), action);
        self.next_seq += 1;
        log::trace!("Scheduled {action:?} at {due:?}");
    }

    /// Number of actions not yet popped.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// When the earliest pending action is due.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Removes the earliest action due at or before `until`, moving the
    /// clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledAction> {
        let due = self.next_due()?;
        if due > until {
            return None;
        }
        let ((due, _), action) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        Some(action)
    }

    /// Moves the clock to `until` once everything due has been popped.
    /// The clock never goes backwards.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn nothing_fires_before_due() {
        let mut timers = EventLoop::default();
        timers.schedule(500 * MS, ScheduledAction::Bootstrap);

        assert_eq!(timers.pop_due(499 * MS), None);
        assert_eq!(timers.pop_due(500 * MS), Some(ScheduledAction::Bootstrap));
        assert_eq!(timers.now(), 500 * MS);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn fires_in_due_then_schedule_order() {
        let mut timers = EventLoop::default();
        timers.schedule(100 * MS, ScheduledAction::ShowDetails(2));
        timers.schedule(50 * MS, ScheduledAction::ShowDetails(1));
        timers.schedule(100 * MS, ScheduledAction::ShowDetails(3));

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(200 * MS)).collect();

        assert_eq!(
            fired,
            vec![
                ScheduledAction::ShowDetails(1),
                ScheduledAction::ShowDetails(2),
                ScheduledAction::ShowDetails(3),
            ]
        );
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut timers = EventLoop::default();
        timers.settle_at(1000 * MS);
        timers.schedule(100 * MS, ScheduledAction::ShowDetails(4));

        assert_eq!(timers.next_due(), Some(1100 * MS));
        timers.settle_at(10 * MS);
        assert_eq!(timers.now(), 1000 * MS);
    }
}
