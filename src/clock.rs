// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time source for "now".

use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use parking_lot::Mutex;

/// Supplies the current time with its UTC offset.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current local time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The system clock in the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that returns a settable instant, for tests and simulations.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Duration};
/// use sunlit::clock::{Clock, FixedClock};
///
/// let start = DateTime::parse_from_rfc3339("2024-06-21T12:00:00+01:00").unwrap();
/// let clock = FixedClock::new(start);
/// assert_eq!(clock.now(), start);
///
/// clock.advance(Duration::hours(1));
/// assert_eq!(clock.now(), start + Duration::hours(1));
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock() = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: chrono::TimeDelta) {
        let mut now = self.now.lock();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock()
    }
}
