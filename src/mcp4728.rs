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
//! MCP4728 quad 12-bit DAC interface

use embedded_hal::i2c::I2c;

use crate::hal::{Channel, Dac};

// 96 is the MCP4728 default device address
pub const DAC_ADDRESS: u8 = 96;

/// Multi-write command: writes one channel's input register and, with UDAC
/// clear, updates its output straight away.
const CMD_MULTI_WRITE: u8 = 0b0100_0000;

const MAX_CODE: u16 = 4095;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    X1,
    X2,
}

/// Where a channel takes its reference voltage from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reference {
    /// The supply rail, in millivolts.  Gain is fixed at 1x.
    Vdd(u16),
    /// The internal 2.048 V reference.
    Internal(Gain),
}

impl Reference {
    /// Output voltage at code 4096, in millivolts.
    #[must_use]
    pub fn full_scale_mv(&self) -> u32 {
        match self {
            Reference::Vdd(mv) => u32::from(*mv),
            Reference::Internal(Gain::X1) => 2048,
            Reference::Internal(Gain::X2) => 4096,
        }
    }

    /// DAC code for `millivolts`, saturating at full scale.
    #[must_use]
    pub fn code(&self, millivolts: u16) -> u16 {
        let full_scale = self.full_scale_mv().max(1);
        let code = u32::from(millivolts) * 4096 / full_scale;
        code.min(u32::from(MAX_CODE)) as u16
    }

    /// VREF and gain bits of the second multi-write byte.
    fn config_bits(&self) -> u8 {
        match self {
            Reference::Vdd(_) => 0,
            Reference::Internal(Gain::X1) => 0b1000_0000,
            Reference::Internal(Gain::X2) => 0b1001_0000,
        }
    }
}

pub struct Mcp4728<I2C> {
    i2c: I2C,
    reference: Reference,
}

impl<I2C: I2c> Mcp4728<I2C> {
    pub fn new(i2c: I2C, reference: Reference) -> Self {
        Self { i2c, reference }
    }

    /// Write a raw 12-bit `code` to `channel`.  Power down bits are left
    /// clear so the output stays driven.
    pub fn set_channel_code(&mut self, channel: Channel, code: u16) -> Result<(), I2C::Error> {
        let code = code.min(MAX_CODE);
        let buf = [
            CMD_MULTI_WRITE | ((channel as u8) << 1),
            self.reference.config_bits() | (code >> 8) as u8,
            (code & 0xFF) as u8,
        ];
        self.i2c.write(DAC_ADDRESS, &buf)
    }
}

impl<I2C: I2c> Dac for Mcp4728<I2C> {
    type Error = I2C::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        let mut buf = [0u8; 3];
        self.i2c.read(DAC_ADDRESS, &mut buf)
    }

    fn set_channel_millivolts(
        &mut self,
        channel: Channel,
        millivolts: u16,
    ) -> Result<(), Self::Error> {
        let code = self.reference.code(millivolts);
        self.set_channel_code(channel, code)
    }
}
