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
// along with this library.  If not, see <http://www.gnu.org/licenses/>.//! Firmware core for a clock whose hands are three analog voltmeters.
//!
//! A DS3231 keeps the time, an MCP4728 drives one meter per hand, and a
//! millisecond counter interpolates between RTC seconds so the second hand
//! sweeps smoothly.  Everything here is hardware independent; the binary
//! wires it to the ATmega328P.

#![cfg_attr(not(test), no_std)]

pub mod adjust;
pub mod button;
pub mod controller;
pub mod dial;
pub mod ds3231;
pub mod error;
pub mod hal;
pub mod mcp4728;
pub mod settings;
pub mod sync;
pub mod time;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
