// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline queue for the control's time-driven transitions.
//!
//! Timers are tagged with the liveness [`Epoch`] current when they were
//! scheduled. Popping a timer from an older epoch yields nothing, so a timer
//! that outlives a detach is a no-op even if clearing the queue was missed.

use core::time::Duration;

use smallvec::SmallVec;

/// Liveness token. Bumped whenever the control detaches.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Epoch(pub(crate) u32);

impl Epoch {
    pub(crate) fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// What a timer does when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TimerAction {
    /// Stop the refresh started in the given cycle.
    AutoStop { cycle: u32 },
    /// Run the stop effects while finishing.
    FinishStop,
    /// Detach and ask the host to remove the control.
    Remove,
}

#[derive(Copy, Clone, Debug)]
struct Timer {
    deadline: Duration,
    epoch: Epoch,
    action: TimerAction,
}

/// Pending timers, fired in deadline order.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimerQueue {
    timers: SmallVec<[Timer; 4]>,
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, deadline: Duration, epoch: Epoch, action: TimerAction) {
        // Stable for equal deadlines: later schedules fire later.
        let at = self
            .timers
            .iter()
            .position(|t| t.deadline > deadline)
            .unwrap_or(self.timers.len());
        self.timers.insert(
            at,
            Timer {
                deadline,
                epoch,
                action,
            },
        );
    }

    /// Removes and returns the earliest timer due at `now` that belongs to `epoch`.
    ///
    /// Due timers from other epochs are discarded on the way.
    pub(crate) fn pop_due(&mut self, now: Duration, epoch: Epoch) -> Option<TimerAction> {
        while self.timers.first().is_some_and(|t| t.deadline <= now) {
            let timer = self.timers.remove(0);
            if timer.epoch == epoch {
                return Some(timer.action);
            }
            log::trace!("dropping stale timer {:?}", timer.action);
        }
        None
    }

    /// Drops pending auto-stop timers.
    pub(crate) fn cancel_auto_stop(&mut self) {
        self.timers
            .retain(|t| !matches!(t.action, TimerAction::AutoStop { .. }));
    }

    pub(crate) fn clear(&mut self) {
        self.timers.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.timers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut queue = TimerQueue::default();
        let epoch = Epoch::default();
        queue.schedule(ms(1000), epoch, TimerAction::Remove);
        queue.schedule(ms(500), epoch, TimerAction::FinishStop);

        assert_eq!(queue.pop_due(ms(400), epoch), None);
        assert_eq!(queue.pop_due(ms(1000), epoch), Some(TimerAction::FinishStop));
        assert_eq!(queue.pop_due(ms(1000), epoch), Some(TimerAction::Remove));
        assert_eq!(queue.pop_due(ms(1000), epoch), None);
    }

    #[test]
    fn stale_epochs_never_fire() {
        let mut queue = TimerQueue::default();
        let mut epoch = Epoch::default();
        queue.schedule(ms(10), epoch, TimerAction::AutoStop { cycle: 1 });
        epoch.advance();
        queue.schedule(ms(20), epoch, TimerAction::Remove);

        assert_eq!(queue.pop_due(ms(30), epoch), Some(TimerAction::Remove));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn cancel_auto_stop_keeps_other_timers() {
        let mut queue = TimerQueue::default();
        let epoch = Epoch::default();
        queue.schedule(ms(10), epoch, TimerAction::AutoStop { cycle: 1 });
        queue.schedule(ms(20), epoch, TimerAction::Remove);
        queue.cancel_auto_stop();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop_due(ms(20), epoch), Some(TimerAction::Remove));
    }
}
