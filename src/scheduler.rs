/*
 *  scheduler.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  One-slot redraw scheduler, ticks aligned to wall-clock seconds
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

/// Interactive mode shows seconds, so redraw once a second
pub const INTERACTIVE_UPDATE_RATE_MS: i64 = 1_000;

/// The single outstanding tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    /// Epoch ms at which the tick is due
    pub due_ms: i64,
}

/// Redraw timer with room for exactly one pending tick.
///
/// Scheduling always replaces, never queues. All calls happen on the event
/// thread, so there is no locking.
#[derive(Debug)]
pub struct RedrawScheduler {
    pending: Option<PendingTick>,
    rate_ms: i64,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::with_rate(INTERACTIVE_UPDATE_RATE_MS)
    }

    pub fn with_rate(rate_ms: i64) -> Self {
        Self { pending: None, rate_ms: rate_ms.max(1) }
    }

    /// Drop the pending tick, if any. Returns true if one was removed.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel, then schedule one immediate tick when the timer should run.
    pub fn update_timer(&mut self, should_run: bool, now_ms: i64) {
        self.cancel();
        if should_run {
            self.pending = Some(PendingTick { due_ms: now_ms });
        }
    }

    /// Consume the pending tick if it is due.
    pub fn take_due(&mut self, now_ms: i64) -> bool {
        match self.pending {
            Some(tick) if tick.due_ms <= now_ms => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Reschedule after a tick fired, landing on the next second boundary.
    ///
    /// Returns the delay used, or `None` when the timer should stop.
    pub fn reschedule_after_tick(&mut self, should_run: bool, now_ms: i64) -> Option<i64> {
        self.cancel();
        if !should_run {
            return None;
        }
        let delay = self.delay_to_boundary(now_ms);
        self.pending = Some(PendingTick { due_ms: now_ms + delay });
        Some(delay)
    }

    /// Milliseconds from `now_ms` to the next rate boundary, in (0, rate].
    pub fn delay_to_boundary(&self, now_ms: i64) -> i64 {
        self.rate_ms - now_ms.rem_euclid(self.rate_ms)
    }

    pub fn pending(&self) -> Option<PendingTick> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending tick, zero when overdue
    pub fn time_until_due(&self, now_ms: i64) -> Option<Duration> {
        self.pending
            .map(|t| Duration::from_millis((t.due_ms - now_ms).max(0) as u64))
    }
}
