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
//! Errors that stop the clock.
//!
//! There is nothing sensible to show on the dials without a working RTC and
//! DAC, so every error here is fatal: the entry point reports it and halts.

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The RTC did not answer at startup.
    RtcNotFound,
    /// The DAC did not answer at startup.
    DacNotFound,
    /// Reading the time failed after startup.
    RtcRead,
    /// Setting the time failed.
    RtcWrite,
    /// Driving a dial failed.
    DacWrite,
}

impl Error {
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Error::RtcNotFound => "Couldn't find DS3231 RTC",
            Error::DacNotFound => "Couldn't find MCP4728 DAC",
            Error::RtcRead => "RTC read failed",
            Error::RtcWrite => "RTC write failed",
            Error::DacWrite => "DAC write failed",
        }
    }
}

impl ufmt::uDisplay for Error {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> core::result::Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.message())
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
