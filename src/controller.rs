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
//! The clock's control loop.
//!
//! `ClockController` owns every peripheral and all mutable state.  The entry
//! point builds one, then calls [`ClockController::tick`] forever; the first
//! tick runs the startup sequence.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use ufmt::{uWrite, uwriteln};

use crate::adjust::{adjust_rtc, AdjustButtons, CalibrationSwitches};
use crate::dial::{DialOverride, DialVoltages, Dials};
use crate::error::{Error, Result};
use crate::hal::{Channel, Dac, Millis, Rtc};
use crate::settings::{Settings, BUILD_TIME};
use crate::sync::TimeSync;
use crate::time::{DateTime, TwoDigits};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Peripherals not probed yet.
    Init,
    Running,
}

pub struct ClockController<R, D, P, M, Dl> {
    rtc: R,
    dac: D,
    buttons: AdjustButtons<P>,
    calibration: CalibrationSwitches<P>,
    millis: M,
    delay: Dl,
    sync: TimeSync,
    dials: Dials,
    log_interval_ms: u32,
    settle_ms: u32,
    sweep_step_mv: u16,
    last_log: Option<u32>,
    hold: Option<DialOverride>,
    state: State,
}

impl<R, D, P, M, Dl> ClockController<R, D, P, M, Dl>
where
    R: Rtc,
    D: Dac,
    P: InputPin,
    M: Millis,
    Dl: DelayNs,
{
    pub fn new(
        rtc: R,
        dac: D,
        buttons: AdjustButtons<P>,
        calibration: CalibrationSwitches<P>,
        millis: M,
        delay: Dl,
        settings: &Settings,
    ) -> Self {
        Self {
            rtc,
            dac,
            buttons,
            calibration,
            millis,
            delay,
            sync: TimeSync::new(settings.sync_interval_ms),
            dials: Dials::new(settings.dial_limits, settings.hour_motion),
            log_interval_ms: settings.log_interval_ms,
            settle_ms: settings.settle_ms,
            sweep_step_mv: settings.sweep_step_mv,
            last_log: None,
            hold: None,
            state: State::Init,
        }
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn sync(&self) -> &TimeSync {
        &self.sync
    }

    /// Probe the RTC and DAC, reseed a stopped RTC, anchor the clock and play
    /// the startup sweep.
    pub fn start<W: uWrite>(&mut self, log: &mut W) -> Result<()> {
        self.rtc.begin().map_err(|_| Error::RtcNotFound)?;
        if self.rtc.lost_power().map_err(|_| Error::RtcRead)? {
            let t = DateTime::from_unixtime(BUILD_TIME);
            self.rtc.adjust(&t).map_err(|_| Error::RtcWrite)?;
            let _ = uwriteln!(log, "RTC lost power, set to {}\r", t);
        }
        self.dac.begin().map_err(|_| Error::DacNotFound)?;

        let now = self.millis.millis();
        self.sync
            .hard_resync(&mut self.rtc, now)
            .map_err(|_| Error::RtcRead)?;
        self.sweep()?;

        self.state = State::Running;
        let _ = uwriteln!(log, "voltmeterclock running\r");
        Ok(())
    }

    /// One pass of the control loop.
    pub fn tick<W: uWrite>(&mut self, log: &mut W) -> Result<()> {
        if self.state == State::Init {
            self.start(log)?;
        }
        let now = self.millis.millis();

        let pressed = self.buttons.poll(now);
        if let Some(t) = adjust_rtc(&mut self.rtc, pressed).map_err(|_| Error::RtcWrite)? {
            self.sync
                .hard_resync(&mut self.rtc, now)
                .map_err(|_| Error::RtcRead)?;
            let _ = uwriteln!(log, "time set to {}\r", t);
        } else if self.sync.is_due(now) {
            let correction = self
                .sync
                .resync(&mut self.rtc, now)
                .map_err(|_| Error::RtcRead)?;
            let _ = uwriteln!(log, "resync {} ms\r", correction);
        }

        let hold = self.calibration.poll(now);
        if hold != self.hold {
            let _ = match hold {
                Some(o) => uwriteln!(log, "hold {}\r", o),
                None => uwriteln!(log, "hold released\r"),
            };
            self.hold = hold;
        }

        let time = self.sync.time_of_day(now);
        self.write_dials(self.dials.voltages(&time, hold))?;

        let log_due = match self.last_log {
            Some(last) => now.wrapping_sub(last) >= self.log_interval_ms,
            None => true,
        };
        if log_due {
            self.last_log = Some(now);
            let _ = uwriteln!(
                log,
                "{}:{}:{}.{}\r",
                TwoDigits(time.hour12()),
                TwoDigits(time.minute),
                TwoDigits(time.second()),
                TwoDigits(((time.millis % 1000) / 10) as u8)
            );
        }
        Ok(())
    }

    /// Hour on A, minute on B, second on C, pausing after each write for the
    /// DAC output to settle.
    fn write_dials(&mut self, v: DialVoltages) -> Result<()> {
        for (channel, mv) in [
            (Channel::A, v.hour),
            (Channel::B, v.minute),
            (Channel::C, v.second),
        ] {
            self.dac
                .set_channel_millivolts(channel, mv)
                .map_err(|_| Error::DacWrite)?;
            self.delay.delay_ms(self.settle_ms);
        }
        Ok(())
    }

    /// Ramp every dial up to its full scale and back to zero together.
    fn sweep(&mut self) -> Result<()> {
        let top = self.dials.overridden(DialOverride::Max);
        let peak = top.hour.max(top.minute).max(top.second);
        let step = self.sweep_step_mv.max(1);
        let level = |mv: u16| DialVoltages {
            hour: mv.min(top.hour),
            minute: mv.min(top.minute),
            second: mv.min(top.second),
        };

        let mut mv = 0;
        loop {
            self.write_dials(level(mv))?;
            if mv >= peak {
                break;
            }
            mv = mv.saturating_add(step).min(peak);
        }
        while mv > 0 {
            mv = mv.saturating_sub(step);
            self.write_dials(level(mv))?;
        }
        Ok(())
    }
}
