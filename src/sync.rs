// This library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this library.  If not, see <http://www.gnu.org/licenses/>.
//! Sub-second clock interpolated between RTC reads.
//!
//! The RTC only reports whole seconds, and reading it every loop would be
//! slow.  Instead an anchor pairs one RTC reading with the millisecond counter
//! value at which it was taken, and the time in between is extrapolated from
//! the counter.  The anchor is refreshed once a minute to bound drift.

use crate::hal::Rtc;
use crate::time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Milliseconds in one minute, the period of the second hand.
pub const MILLIS_PER_MINUTE: u16 = 60_000;

/// An RTC reading paired with the counter value it corresponds to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncAnchor {
    pub unix_seconds: u32,
    pub millis: u32,
}

/// The extrapolated time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeOfDay {
    /// 0 to 23.
    pub hour: u8,
    pub minute: u8,
    /// Milliseconds into the current minute, 0 to 59 999.
    pub millis: u16,
}

impl TimeOfDay {
    #[must_use]
    pub fn hour12(&self) -> u8 {
        self.hour % 12
    }

    #[must_use]
    pub fn second(&self) -> u8 {
        (self.millis / 1000) as u8
    }

    /// Seconds into the current minute, in [0, 60).
    #[must_use]
    pub fn fractional_second(&self) -> f32 {
        f32::from(self.millis) / 1000.0
    }
}

/// Keeps the anchor and decides when it is due for a refresh.
pub struct TimeSync {
    anchor: SyncAnchor,
    last_sync: u32,
    interval_ms: u32,
}

impl TimeSync {
    #[must_use]
    pub fn new(interval_ms: u32) -> Self {
        Self {
            anchor: SyncAnchor::default(),
            last_sync: 0,
            interval_ms,
        }
    }

    #[must_use]
    pub fn anchor(&self) -> SyncAnchor {
        self.anchor
    }

    /// True once `interval_ms` have passed since the last resync.
    #[must_use]
    pub fn is_due(&self, now: u32) -> bool {
        now.wrapping_sub(self.last_sync) >= self.interval_ms
    }

    /// Anchor at the start of RTC second `unix_seconds`, discarding whatever
    /// the counter had extrapolated.  Used at startup and after the time was
    /// set, when the old anchor says nothing about the new time.
    pub fn anchor_at(&mut self, unix_seconds: u32, now: u32) {
        self.anchor = SyncAnchor {
            unix_seconds,
            millis: now,
        };
        self.last_sync = now;
    }

    /// Re-anchor against a fresh RTC reading while keeping the sub-second
    /// phase.
    ///
    /// The true time lies somewhere in `[unix_seconds, unix_seconds + 1)`.  An
    /// extrapolated instant inside that window is kept as is; one outside is
    /// moved to the nearest edge.  Returns the correction applied in
    /// milliseconds, positive when the dials move forward.
    pub fn correct(&mut self, unix_seconds: u32, now: u32) -> i32 {
        let (secs, ms) = self.unix_time(now);
        let phase: u16 = match secs.cmp(&unix_seconds) {
            core::cmp::Ordering::Equal => ms,
            core::cmp::Ordering::Less => 0,
            core::cmp::Ordering::Greater => 999,
        };
        let before = i64::from(secs) * 1000 + i64::from(ms);
        let after = i64::from(unix_seconds) * 1000 + i64::from(phase);

        self.anchor = SyncAnchor {
            unix_seconds,
            millis: now.wrapping_sub(u32::from(phase)),
        };
        self.last_sync = now;
        (after - before).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Read the RTC and hard anchor against it.
    pub fn hard_resync<R: Rtc>(&mut self, rtc: &mut R, now: u32) -> Result<(), R::Error> {
        let t = rtc.now()?;
        self.anchor_at(t.unixtime(), now);
        Ok(())
    }

    /// Read the RTC and correct the anchor against it, see [`TimeSync::correct`].
    pub fn resync<R: Rtc>(&mut self, rtc: &mut R, now: u32) -> Result<i32, R::Error> {
        let t = rtc.now()?;
        Ok(self.correct(t.unixtime(), now))
    }

    /// Extrapolated Unix time as whole seconds and milliseconds.
    #[must_use]
    pub fn unix_time(&self, now: u32) -> (u32, u16) {
        let elapsed = now.wrapping_sub(self.anchor.millis);
        (
            self.anchor.unix_seconds.wrapping_add(elapsed / 1000),
            (elapsed % 1000) as u16,
        )
    }

    /// Seconds into the current minute with sub-second precision, in [0, 60).
    #[must_use]
    pub fn fractional_second(&self, now: u32) -> f32 {
        let (secs, ms) = self.unix_time(now);
        (secs % SECONDS_PER_MINUTE) as f32 + f32::from(ms) / 1000.0
    }

    #[must_use]
    pub fn time_of_day(&self, now: u32) -> TimeOfDay {
        let (secs, ms) = self.unix_time(now);
        let of_day = secs % SECONDS_PER_DAY;
        TimeOfDay {
            hour: (of_day / SECONDS_PER_HOUR) as u8,
            minute: ((of_day / SECONDS_PER_MINUTE) % 60) as u8,
            millis: ((of_day % SECONDS_PER_MINUTE) * 1000) as u16 + ms,
        }
    }
}
