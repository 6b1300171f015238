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
//! Host side stand-ins for the board, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::hal::{Channel, Dac, Millis, Rtc};
use crate::time::DateTime;

/// Collects log output.
#[derive(Default)]
pub struct Log(pub String);

impl ufmt::uWrite for Log {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}

/// A pulled-up input whose button can be pressed from the test.
#[derive(Clone, Default)]
pub struct FakePin(Rc<Cell<bool>>);

impl FakePin {
    pub fn set_down(&self, down: bool) {
        self.0.set(down);
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}

#[derive(Clone, Default)]
pub struct FakeMillis(Rc<Cell<u32>>);

impl FakeMillis {
    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Millis for FakeMillis {
    fn millis(&self) -> u32 {
        self.0.get()
    }
}

struct RtcState {
    time: DateTime,
    present: bool,
    lost_power: bool,
    fail_reads: bool,
    reads: usize,
    writes: usize,
}

/// An RTC whose time only changes when the test or an adjustment sets it.
#[derive(Clone)]
pub struct FakeRtc(Rc<RefCell<RtcState>>);

impl FakeRtc {
    pub fn new(time: DateTime) -> Self {
        Self(Rc::new(RefCell::new(RtcState {
            time,
            present: true,
            lost_power: false,
            fail_reads: false,
            reads: 0,
            writes: 0,
        })))
    }

    pub fn set(&self, time: DateTime) {
        self.0.borrow_mut().time = time;
    }

    pub fn time(&self) -> DateTime {
        self.0.borrow().time
    }

    pub fn set_present(&self, present: bool) {
        self.0.borrow_mut().present = present;
    }

    pub fn set_lost_power(&self, lost: bool) {
        self.0.borrow_mut().lost_power = lost;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.0.borrow_mut().fail_reads = fail;
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl Rtc for FakeRtc {
    type Error = ();

    fn begin(&mut self) -> Result<(), ()> {
        if self.0.borrow().present {
            Ok(())
        } else {
            Err(())
        }
    }

    fn lost_power(&mut self) -> Result<bool, ()> {
        Ok(self.0.borrow().lost_power)
    }

    fn now(&mut self) -> Result<DateTime, ()> {
        let mut state = self.0.borrow_mut();
        if state.fail_reads {
            return Err(());
        }
        state.reads += 1;
        Ok(state.time)
    }

    fn adjust(&mut self, time: &DateTime) -> Result<(), ()> {
        let mut state = self.0.borrow_mut();
        state.time = *time;
        state.lost_power = false;
        state.writes += 1;
        Ok(())
    }
}

struct DacState {
    present: bool,
    writes: Vec<(Channel, u16)>,
}

/// A DAC that records every channel write.
#[derive(Clone)]
pub struct RecordingDac(Rc<RefCell<DacState>>);

impl Default for RecordingDac {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(DacState {
            present: true,
            writes: Vec::new(),
        })))
    }
}

impl RecordingDac {
    pub fn set_present(&self, present: bool) {
        self.0.borrow_mut().present = present;
    }

    pub fn writes(&self) -> Vec<(Channel, u16)> {
        self.0.borrow().writes.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().writes.clear();
    }

    /// The most recent value written to `channel`.
    pub fn last(&self, channel: Channel) -> Option<u16> {
        self.0
            .borrow()
            .writes
            .iter()
            .rev()
            .find(|(c, _)| *c == channel)
            .map(|&(_, mv)| mv)
    }
}

impl Dac for RecordingDac {
    type Error = ();

    fn begin(&mut self) -> Result<(), ()> {
        if self.0.borrow().present {
            Ok(())
        } else {
            Err(())
        }
    }

    fn set_channel_millivolts(&mut self, channel: Channel, millivolts: u16) -> Result<(), ()> {
        self.0.borrow_mut().writes.push((channel, millivolts));
        Ok(())
    }
}
