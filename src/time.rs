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
//! Calendar time as kept by the RTC.
//!
//! Times are local wall clock values with no zone attached.  Unix seconds are
//! computed as if the wall clock were UTC, which is all the dials need: the
//! time of day falls out of `unixtime() % 86400`.

use ufmt::{uDisplay, uWrite, Formatter};

pub const SECONDS_PER_MINUTE: u32 = 60;
pub const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u32 = 24 * SECONDS_PER_HOUR;

/// Unix seconds at 2000-01-01 00:00:00, the earliest time the DS3231 holds.
pub const EPOCH_2000: u32 = 946_684_800;

/// A calendar date and time of day, valid for the years 2000 to 2099.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Constructs a `DateTime`, or `None` if any field is out of range.
    #[must_use]
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Option<Self> {
        if !(2000..=2099).contains(&year)
            || !(1..=12).contains(&month)
            || day == 0
            || day > days_in_month(year, month)
            || hour > 23
            || minute > 59
            || second > 59
        {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Seconds since 1970-01-01 00:00:00.
    #[must_use]
    pub fn unixtime(&self) -> u32 {
        let days = days_from_civil(i32::from(self.year), self.month, self.day);
        // Years 2000..=2099 keep `days` positive and the result inside u32.
        (days as u32) * SECONDS_PER_DAY
            + u32::from(self.hour) * SECONDS_PER_HOUR
            + u32::from(self.minute) * SECONDS_PER_MINUTE
            + u32::from(self.second)
    }

    /// The inverse of [`DateTime::unixtime`].  Times before 2000 clamp to
    /// 2000-01-01 00:00:00.
    #[must_use]
    pub fn from_unixtime(t: u32) -> Self {
        let t = t.max(EPOCH_2000);
        let days = t / SECONDS_PER_DAY;
        let rem = t % SECONDS_PER_DAY;
        let (year, month, day) = civil_from_days(days as i32);
        Self {
            year: year as u16,
            month,
            day,
            hour: (rem / SECONDS_PER_HOUR) as u8,
            minute: ((rem / SECONDS_PER_MINUTE) % 60) as u8,
            second: (rem % 60) as u8,
        }
    }

    /// Day of the week, 0 = Sunday.
    #[must_use]
    pub fn weekday(&self) -> u8 {
        let days = days_from_civil(i32::from(self.year), self.month, self.day);
        // 1970-01-01 was a Thursday.
        ((days + 4).rem_euclid(7)) as u8
    }

    /// Hour on a twelve hour dial, 0 to 11.
    #[must_use]
    pub fn hour12(&self) -> u8 {
        self.hour % 12
    }

    /// One hour later, wrapping 23 to 0 without touching the date.
    #[must_use]
    pub fn add_hour(self) -> Self {
        Self {
            hour: (self.hour + 1) % 24,
            ..self
        }
    }

    /// One minute later, wrapping 59 to 0 without carrying into the hour.
    #[must_use]
    pub fn add_minute(self) -> Self {
        Self {
            minute: (self.minute + 1) % 60,
            ..self
        }
    }

    #[must_use]
    pub fn zero_seconds(self) -> Self {
        Self { second: 0, ..self }
    }
}

impl uDisplay for DateTime {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        self.year.fmt(f)?;
        f.write_char('-')?;
        TwoDigits(self.month).fmt(f)?;
        f.write_char('-')?;
        TwoDigits(self.day).fmt(f)?;
        f.write_char(' ')?;
        TwoDigits(self.hour).fmt(f)?;
        f.write_char(':')?;
        TwoDigits(self.minute).fmt(f)?;
        f.write_char(':')?;
        TwoDigits(self.second).fmt(f)
    }
}

/// Zero padded two digit number for `ufmt`, which has no width specifiers.
pub struct TwoDigits(pub u8);

impl uDisplay for TwoDigits {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let v = self.0 % 100;
        f.write_char(char::from(b'0' + v / 10))?;
        f.write_char(char::from(b'0' + v % 10))
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Howard Hinnant's days_from_civil, see
// http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u8, day: u8) -> i32 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i32::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i32::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i32) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i32::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Log;

    fn dt(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
        DateTime::new(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn unixtime_matches_known_instants() {
        assert_eq!(dt(2000, 1, 1, 0, 0, 0).unixtime(), EPOCH_2000);
        assert_eq!(dt(2024, 2, 29, 12, 34, 56).unixtime(), 1_709_210_096);
        assert_eq!(dt(2099, 12, 31, 23, 59, 59).unixtime(), 4_102_444_799);
    }

    #[test]
    fn from_unixtime_inverts_unixtime() {
        for t in [EPOCH_2000, 1_709_210_096, 1_735_689_599, 4_102_444_799] {
            assert_eq!(DateTime::from_unixtime(t).unixtime(), t);
        }
        assert_eq!(
            DateTime::from_unixtime(1_709_210_096),
            dt(2024, 2, 29, 12, 34, 56)
        );
    }

    #[test]
    fn from_unixtime_clamps_before_2000() {
        assert_eq!(DateTime::from_unixtime(0), dt(2000, 1, 1, 0, 0, 0));
    }

    #[test]
    fn new_rejects_out_of_range_fields() {
        assert!(DateTime::new(2023, 2, 29, 0, 0, 0).is_none());
        assert!(DateTime::new(2024, 2, 29, 0, 0, 0).is_some());
        assert!(DateTime::new(2024, 13, 1, 0, 0, 0).is_none());
        assert!(DateTime::new(2024, 1, 1, 24, 0, 0).is_none());
        assert!(DateTime::new(1999, 12, 31, 0, 0, 0).is_none());
    }

    #[test]
    fn weekday_counts_from_sunday() {
        // 2000-01-01 was a Saturday, 2024-02-29 a Thursday.
        assert_eq!(dt(2000, 1, 1, 0, 0, 0).weekday(), 6);
        assert_eq!(dt(2024, 2, 29, 0, 0, 0).weekday(), 4);
    }

    #[test]
    fn add_hour_wraps_without_changing_date() {
        let t = dt(2024, 12, 31, 23, 10, 5).add_hour();
        assert_eq!(t, dt(2024, 12, 31, 0, 10, 5));
    }

    #[test]
    fn add_minute_wraps_without_carry() {
        let t = dt(2024, 6, 1, 7, 59, 30).add_minute();
        assert_eq!(t, dt(2024, 6, 1, 7, 0, 30));
    }

    #[test]
    fn hour_and_minute_increments_round_trip() {
        let start = dt(2024, 6, 1, 5, 42, 17);
        let mut t = start;
        for _ in 0..24 {
            t = t.add_hour();
        }
        assert_eq!(t, start);
        let mut t = start;
        for _ in 0..23 {
            t = t.add_hour();
        }
        assert_eq!(t.hour, 4);
        let mut t = start;
        for _ in 0..60 {
            t = t.add_minute();
        }
        assert_eq!(t, start);
    }

    #[test]
    fn zero_seconds_keeps_hour_and_minute() {
        assert_eq!(dt(2024, 6, 1, 5, 42, 17).zero_seconds(), dt(2024, 6, 1, 5, 42, 0));
    }

    #[test]
    fn formats_with_padding() {
        let mut log = Log::default();
        ufmt::uwrite!(log, "{}", dt(2024, 3, 7, 9, 5, 0)).unwrap();
        assert_eq!(log.0, "2024-03-07 09:05:00");
    }
}
