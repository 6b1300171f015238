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
//! Capabilities the clock needs from the board.
//!
//! Pins and delays use the `embedded-hal` traits directly; the RTC, DAC and
//! millisecond counter get the small traits below so the control loop can run
//! against fakes on the host.

use crate::time::DateTime;

/// A battery backed real-time clock with one second resolution.
pub trait Rtc {
    type Error: core::fmt::Debug;

    /// Check the chip answers on its bus.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// True if the oscillator stopped since the time was last set, e.g. the
    /// backup battery ran flat.
    fn lost_power(&mut self) -> Result<bool, Self::Error>;

    fn now(&mut self) -> Result<DateTime, Self::Error>;

    fn adjust(&mut self, time: &DateTime) -> Result<(), Self::Error>;
}

/// One output of a multi-channel DAC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// A multi-channel DAC addressed in millivolts.
pub trait Dac {
    type Error: core::fmt::Debug;

    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Drive `channel` to `millivolts`, saturating at the converter's full
    /// scale.
    fn set_channel_millivolts(&mut self, channel: Channel, millivolts: u16)
        -> Result<(), Self::Error>;
}

/// A free running millisecond counter, like Arduino's `millis()`.  Wraps
/// after about 49.7 days.
pub trait Millis {
    fn millis(&self) -> u32;
}
