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
//! Compile time settings.
//!
//! There is no settings storage on the clock: everything is fixed when the
//! firmware is built.  Trim the dial limits here after checking the meters
//! against the calibration overrides.

use crate::dial::{DialLimits, HourMotion};
use crate::time::EPOCH_2000;

/// Clock settings, fixed at build time.
pub struct Settings {
    /// Full scale millivolts per hand.  Default: 3000 each.
    pub dial_limits: DialLimits,

    /// Hour hand motion.  Default: smooth.
    pub hour_motion: HourMotion,

    /// How often the RTC is re-read to correct drift.  Default: 60 s.
    pub sync_interval_ms: u32,

    /// Minimum gap between time lines on the serial port.  Default: 100 ms.
    pub log_interval_ms: u32,

    /// Time a button must be stable before a press counts.  Default: 50 ms.
    pub debounce_ms: u16,

    /// Time a calibration switch must be held to engage.  Default: 1 s.
    pub hold_engage_ms: u16,

    /// Pause after each DAC channel write.  Default: 1 ms.
    pub settle_ms: u32,

    /// Millivolts per step of the startup sweep.  Default: 5.
    pub sweep_step_mv: u16,
}

// "Factory" default configuration can be configured here:
const HOUR_MAX_MV_DEFAULT: u16 = 3000;
const MINUTE_MAX_MV_DEFAULT: u16 = 3000;
const SECOND_MAX_MV_DEFAULT: u16 = 3000;

const SYNC_INTERVAL_MS_DEFAULT: u32 = 60_000;
const LOG_INTERVAL_MS_DEFAULT: u32 = 100;
const DEBOUNCE_MS_DEFAULT: u16 = 50;
const HOLD_ENGAGE_MS_DEFAULT: u16 = 1_000;
const SETTLE_MS_DEFAULT: u32 = 1;
const SWEEP_STEP_MV_DEFAULT: u16 = 5;

impl Default for Settings {
    fn default() -> Self {
        Self {
            dial_limits: DialLimits {
                hour: HOUR_MAX_MV_DEFAULT,
                minute: MINUTE_MAX_MV_DEFAULT,
                second: SECOND_MAX_MV_DEFAULT,
            },
            hour_motion: HourMotion::Smooth,
            sync_interval_ms: SYNC_INTERVAL_MS_DEFAULT,
            log_interval_ms: LOG_INTERVAL_MS_DEFAULT,
            debounce_ms: DEBOUNCE_MS_DEFAULT,
            hold_engage_ms: HOLD_ENGAGE_MS_DEFAULT,
            settle_ms: SETTLE_MS_DEFAULT,
            sweep_step_mv: SWEEP_STEP_MV_DEFAULT,
        }
    }
}

/// Local wall clock time the firmware was built at, as Unix seconds.  The RTC
/// is seeded with it after losing power.
pub const BUILD_TIME: u32 = parse_build_time(env!("VOLTMETERCLOCK_BUILD_TIME"));

const fn parse_build_time(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if matches!(b, b'0'..=b'9') {
            value = value.wrapping_mul(10).wrapping_add((b - b'0') as u32);
        }
        i += 1;
    }
    if value < EPOCH_2000 {
        EPOCH_2000
    } else {
        value
    }
}
