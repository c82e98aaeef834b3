/*
 *  clock.rs
 *
 *  Sunshine Face - weather at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Wall-clock source for the face and the redraw scheduler
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

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of wall-clock time.
///
/// Everything the face schedules is expressed in epoch milliseconds so tick
/// alignment can be checked against a fake clock.
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;

    /// Current local offset from UTC
    fn utc_offset(&self) -> FixedOffset;

    /// Current time in the given zone
    fn now_in(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.now_ms()).unwrap_or_default();
        utc.with_timezone(&offset)
    }
}

/// System time and the host's local zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn utc_offset(&self) -> FixedOffset {
        Local::now().offset().fix()
    }
}

/// Hand-driven clock for tests and scripted demos.
///
/// Clones share the same time, so a test can keep one handle while the face
/// owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Rc<Cell<i64>>,
    offset: Rc<Cell<FixedOffset>>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(now_ms)),
            offset: Rc::new(Cell::new(Utc.fix())),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn set_offset(&self, offset: FixedOffset) {
        self.offset.set(offset);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn utc_offset(&self) -> FixedOffset {
        self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let other = clock.clone();
        clock.advance(500);
        assert_eq!(other.now_ms(), 1_500);
    }

    #[test]
    fn test_now_in_applies_offset() {
        // 1970-01-01 00:00:05 UTC
        let clock = ManualClock::new(5_000);
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let t = clock.now_in(plus_two);
        assert_eq!(t.hour(), 2);
        assert_eq!(t.second(), 5);
    }
}
