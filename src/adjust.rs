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
//! Setting the time and calibrating the dials from the front panel.
//!
//! Three buttons set the time: hour and minute step forward by one, second
//! zeroes the seconds.  Three more switches pin the dials to zero, mid or full
//! scale while held, for trimming the meters' mechanical zero and span.

use embedded_hal::digital::InputPin;

use crate::button::{Button, HoldSwitch};
use crate::dial::DialOverride;
use crate::hal::Rtc;
use crate::time::DateTime;

/// Time changes requested by the buttons during one loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Adjustments {
    pub hour: bool,
    pub minute: bool,
    pub zero_seconds: bool,
}

impl Adjustments {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.hour || self.minute || self.zero_seconds)
    }

    /// Apply hour, then minute, then seconds.  Neither step carries into the
    /// next field or into the date: the dials only show twelve hours.
    #[must_use]
    pub fn apply(&self, mut t: DateTime) -> DateTime {
        if self.hour {
            t = t.add_hour();
        }
        if self.minute {
            t = t.add_minute();
        }
        if self.zero_seconds {
            t = t.zero_seconds();
        }
        t
    }
}

/// The hour, minute and second buttons.
pub struct AdjustButtons<P> {
    hour: Button<P>,
    minute: Button<P>,
    second: Button<P>,
}

impl<P: InputPin> AdjustButtons<P> {
    pub fn new(hour: Button<P>, minute: Button<P>, second: Button<P>) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Poll every button once.
    pub fn poll(&mut self, now: u32) -> Adjustments {
        Adjustments {
            hour: self.hour.is_pressed(now),
            minute: self.minute.is_pressed(now),
            zero_seconds: self.second.is_pressed(now),
        }
    }
}

/// Read the RTC once, apply `adjustments` and write the result back.
///
/// Returns the new time, or `None` without touching the RTC when nothing was
/// pressed.
pub fn adjust_rtc<R: Rtc>(
    rtc: &mut R,
    adjustments: Adjustments,
) -> Result<Option<DateTime>, R::Error> {
    if adjustments.is_empty() {
        return Ok(None);
    }
    let t = adjustments.apply(rtc.now()?);
    rtc.adjust(&t)?;
    Ok(Some(t))
}

/// The three calibration switches.
pub struct CalibrationSwitches<P> {
    zero: HoldSwitch<P>,
    mid: HoldSwitch<P>,
    max: HoldSwitch<P>,
}

impl<P: InputPin> CalibrationSwitches<P> {
    pub fn new(zero: HoldSwitch<P>, mid: HoldSwitch<P>, max: HoldSwitch<P>) -> Self {
        Self { zero, mid, max }
    }

    /// The override currently held, if any.  All three are polled every time
    /// so their hold timers stay current.
    pub fn poll(&mut self, now: u32) -> Option<DialOverride> {
        let zero = self.zero.is_held(now);
        let mid = self.mid.is_held(now);
        let max = self.max.is_held(now);
        DialOverride::select(zero, mid, max)
    }
}
