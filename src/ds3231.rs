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
//! DS3231 RTC interface

use embedded_hal::i2c::I2c;

use crate::hal::Rtc;
use crate::time::DateTime;

// 104 is the DS3231 RTC device address
pub const RTC_ADDRESS: u8 = 104;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;

/// Oscillator Stop Flag: set whenever the oscillator halted, e.g. on first
/// power up or when the backup battery is flat.
const STATUS_OSF: u8 = 0b1000_0000;

const HOUR_12H_MODE: u8 = 0b0100_0000;
const HOUR_PM: u8 = 0b0010_0000;

#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    I2c(E),
    /// The time registers held a value that is not a valid date.
    InvalidTime,
}

pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(RTC_ADDRESS, &[reg], &mut buf)?;
        Ok(buf[0])
    }
}

impl<I2C: I2c> Rtc for Ds3231<I2C> {
    type Error = Error<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.read_register(REG_STATUS).map_err(Error::I2c)?;
        Ok(())
    }

    fn lost_power(&mut self) -> Result<bool, Self::Error> {
        let status = self.read_register(REG_STATUS).map_err(Error::I2c)?;
        Ok(status & STATUS_OSF != 0)
    }

    fn now(&mut self) -> Result<DateTime, Self::Error> {
        // Read out seconds through year, starting at register 0
        let mut buf = [0u8; 7];
        self.i2c
            .write_read(RTC_ADDRESS, &[REG_SECONDS], &mut buf)
            .map_err(Error::I2c)?;

        let second = bcd_decode(buf[0] & 0x7F);
        let minute = bcd_decode(buf[1] & 0x7F);
        let hour = if buf[2] & HOUR_12H_MODE != 0 {
            let h = bcd_decode(buf[2] & 0x1F) % 12;
            if buf[2] & HOUR_PM != 0 {
                h + 12
            } else {
                h
            }
        } else {
            bcd_decode(buf[2] & 0x3F)
        };
        // buf[3] is the day of the week, derived from the date instead.
        let day = bcd_decode(buf[4] & 0x3F);
        // Bit 7 of the month register is the century, ignored as the DS3231
        // is only used for 2000-2099.
        let month = bcd_decode(buf[5] & 0x1F);
        let year = 2000 + u16::from(bcd_decode(buf[6]));

        DateTime::new(year, month, day, hour, minute, second).ok_or(Error::InvalidTime)
    }

    fn adjust(&mut self, time: &DateTime) -> Result<(), Self::Error> {
        let weekday = match time.weekday() {
            0 => 7,
            d => d,
        };
        let buf: [u8; 8] = [
            REG_SECONDS,
            bcd_encode(time.second),
            bcd_encode(time.minute),
            // Always written in 24 hour mode.
            bcd_encode(time.hour),
            weekday,
            bcd_encode(time.day),
            bcd_encode(time.month),
            bcd_encode(time.year.saturating_sub(2000).min(99) as u8),
        ];
        self.i2c.write(RTC_ADDRESS, &buf).map_err(Error::I2c)?;

        // The time is valid again, clear the oscillator stop flag.
        let status = self.read_register(REG_STATUS).map_err(Error::I2c)?;
        self.i2c
            .write(RTC_ADDRESS, &[REG_STATUS, status & !STATUS_OSF])
            .map_err(Error::I2c)
    }
}

fn bcd_encode(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

fn bcd_decode(v: u8) -> u8 {
    ((v & 0b1111_0000) >> 4) * 10 + (v & 0b0000_1111)
}
