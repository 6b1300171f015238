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
//! Time to dial voltage mapping.
//!
//! Each hand is a voltmeter whose full scale stands for one revolution: twelve
//! hours, sixty minutes or sixty seconds.  The printed scales never quite
//! match each other, so every channel has its own full scale millivolts.

use crate::sync::{TimeOfDay, MILLIS_PER_MINUTE};

const MILLIS_PER_HOUR: u32 = 60 * MILLIS_PER_MINUTE as u32;
const MILLIS_PER_TWELVE_HOURS: u32 = 12 * MILLIS_PER_HOUR;

/// Full scale output for each hand, in millivolts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialLimits {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

impl Default for DialLimits {
    fn default() -> Self {
        Self {
            hour: 3000,
            minute: 3000,
            second: 3000,
        }
    }
}

/// How the hour hand advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HourMotion {
    /// Sweeps continuously with the minutes and seconds.
    #[default]
    Smooth,
    /// Steps once per minute.
    PerMinute,
}

/// Calibration states that pin every dial to one point of its scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialOverride {
    Zero,
    Mid,
    Max,
}

impl DialOverride {
    /// Pick the override for the switches currently held.  Zero wins over
    /// mid, mid wins over max.
    #[must_use]
    pub fn select(zero: bool, mid: bool, max: bool) -> Option<Self> {
        if zero {
            Some(Self::Zero)
        } else if mid {
            Some(Self::Mid)
        } else if max {
            Some(Self::Max)
        } else {
            None
        }
    }
}

impl ufmt::uDisplay for DialOverride {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(match self {
            Self::Zero => "zero",
            Self::Mid => "mid",
            Self::Max => "max",
        })
    }
}

/// Millivolts for each hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DialVoltages {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

/// Maps time of day to hand voltages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dials {
    pub limits: DialLimits,
    pub hour_motion: HourMotion,
}

impl Dials {
    #[must_use]
    pub fn new(limits: DialLimits, hour_motion: HourMotion) -> Self {
        Self {
            limits,
            hour_motion,
        }
    }

    /// Voltages for `hour12` (0-11), `minute` (0-59) and `millis` into the
    /// minute (0-59 999).  Every output is clamped to its channel limit.
    #[must_use]
    pub fn map(&self, hour12: u8, minute: u8, millis: u16) -> DialVoltages {
        let into_hour = u32::from(minute) * u32::from(MILLIS_PER_MINUTE) + u32::from(millis);
        let hour_millis = u32::from(hour12) * MILLIS_PER_HOUR
            + match self.hour_motion {
                HourMotion::Smooth => into_hour,
                HourMotion::PerMinute => u32::from(minute) * u32::from(MILLIS_PER_MINUTE),
            };
        DialVoltages {
            hour: scale(hour_millis, MILLIS_PER_TWELVE_HOURS, self.limits.hour),
            minute: scale(into_hour, MILLIS_PER_HOUR, self.limits.minute),
            second: scale(
                u32::from(millis),
                u32::from(MILLIS_PER_MINUTE),
                self.limits.second,
            ),
        }
    }

    /// Voltages for the time of day, or the override if one is held.
    #[must_use]
    pub fn voltages(&self, time: &TimeOfDay, hold: Option<DialOverride>) -> DialVoltages {
        match hold {
            Some(o) => self.overridden(o),
            None => self.map(time.hour12(), time.minute, time.millis),
        }
    }

    #[must_use]
    pub fn overridden(&self, hold: DialOverride) -> DialVoltages {
        let l = &self.limits;
        match hold {
            DialOverride::Zero => DialVoltages::default(),
            DialOverride::Mid => DialVoltages {
                hour: l.hour / 2,
                minute: l.minute / 2,
                second: l.second / 2,
            },
            DialOverride::Max => DialVoltages {
                hour: l.hour,
                minute: l.minute,
                second: l.second,
            },
        }
    }
}

/// `value / span * max`, truncated and clamped to `max`.
fn scale(value: u32, span: u32, max: u16) -> u16 {
    let mv = u64::from(value) * u64::from(max) / u64::from(span);
    mv.min(u64::from(max)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(max: u16) -> Dials {
        Dials::new(
            DialLimits {
                hour: max,
                minute: max,
                second: max,
            },
            HourMotion::Smooth,
        )
    }

    #[test]
    fn maps_quarter_past_three() {
        let v = flat(3000).map(3, 15, 30_000);
        // (3*3600 + 15*60 + 30) / 43200 * 3000 = 814.58
        assert_eq!(v.hour, 814);
        // (15*60 + 30) / 3600 * 3000 = 775
        assert_eq!(v.minute, 775);
        assert_eq!(v.second, 1500);
    }

    #[test]
    fn midnight_is_zero_and_last_millisecond_stays_below_max() {
        let dials = flat(3000);
        assert_eq!(dials.map(0, 0, 0), DialVoltages::default());
        let v = dials.map(11, 59, 59_999);
        assert_eq!(v, DialVoltages { hour: 2999, minute: 2999, second: 2999 });
    }

    #[test]
    fn channels_use_their_own_limits() {
        let dials = Dials::new(
            DialLimits {
                hour: 2860,
                minute: 2860,
                second: 2805,
            },
            HourMotion::Smooth,
        );
        let v = dials.map(6, 30, 30_000);
        assert_eq!(v.hour, 1551);
        assert_eq!(v.minute, 1453);
        assert_eq!(v.second, 1402);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let v = flat(3000).map(23, 200, 65_000);
        assert_eq!(v, DialVoltages { hour: 3000, minute: 3000, second: 3000 });
    }

    #[test]
    fn second_hand_never_decreases_within_a_minute() {
        let dials = flat(4095);
        let mut last = 0;
        for ms in 0..MILLIS_PER_MINUTE {
            let v = dials.map(0, 0, ms).second;
            assert!(v >= last);
            assert!(v <= 4095);
            last = v;
        }
        // One millivolt per 1/4095 of a minute, so every 15 ms moves the hand.
        for ms in (0..MILLIS_PER_MINUTE - 15).step_by(15) {
            assert!(dials.map(0, 0, ms + 15).second > dials.map(0, 0, ms).second);
        }
    }

    #[test]
    fn minute_and_hour_hands_rise_with_time() {
        let dials = flat(3000);
        let mut last = dials.map(0, 0, 0);
        for hour in 0..12 {
            for minute in 0..60 {
                if hour == 0 && minute == 0 {
                    continue;
                }
                let v = dials.map(hour, minute, 0);
                assert!(v.hour > last.hour, "hour stalled at {}:{}", hour, minute);
                if minute > 0 {
                    assert!(v.minute > last.minute);
                }
                assert!(v.hour <= 3000 && v.minute <= 3000);
                last = v;
            }
        }
    }

    #[test]
    fn per_minute_hour_hand_ignores_seconds() {
        let dials = Dials::new(DialLimits::default(), HourMotion::PerMinute);
        assert_eq!(dials.map(3, 15, 0).hour, dials.map(3, 15, 59_999).hour);
        assert!(dials.map(3, 16, 0).hour > dials.map(3, 15, 59_999).hour);
        assert_eq!(
            dials.map(3, 15, 59_999).minute,
            flat(3000).map(3, 15, 59_999).minute
        );
    }

    #[test]
    fn overrides_pin_each_channel() {
        let dials = Dials::new(
            DialLimits {
                hour: 2860,
                minute: 2860,
                second: 2805,
            },
            HourMotion::Smooth,
        );
        let now = TimeOfDay {
            hour: 15,
            minute: 15,
            millis: 30_000,
        };
        assert_eq!(
            dials.voltages(&now, Some(DialOverride::Max)),
            DialVoltages { hour: 2860, minute: 2860, second: 2805 }
        );
        assert_eq!(
            dials.voltages(&now, Some(DialOverride::Mid)),
            DialVoltages { hour: 1430, minute: 1430, second: 1402 }
        );
        assert_eq!(
            dials.voltages(&now, Some(DialOverride::Zero)),
            DialVoltages::default()
        );
        assert_eq!(dials.voltages(&now, None), dials.map(3, 15, 30_000));
    }

    #[test]
    fn override_precedence_is_zero_mid_max() {
        assert_eq!(DialOverride::select(true, true, true), Some(DialOverride::Zero));
        assert_eq!(DialOverride::select(false, true, true), Some(DialOverride::Mid));
        assert_eq!(DialOverride::select(true, false, true), Some(DialOverride::Zero));
        assert_eq!(DialOverride::select(false, false, true), Some(DialOverride::Max));
        assert_eq!(DialOverride::select(false, false, false), None);
    }
}
