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
//! Polled push buttons.
//!
//! All buttons are wired between the pin and ground with the internal pull-up
//! enabled, so a pressed button reads low.

use embedded_hal::digital::InputPin;

/// A debounced button reporting one event per press.
pub struct Button<P> {
    pin: P,
    debounce_ms: u16,
    last_level: bool,
    last_change: u32,
    confirmed: bool,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P, debounce_ms: u16) -> Self {
        Self {
            pin,
            debounce_ms,
            last_level: false,
            last_change: 0,
            confirmed: false,
        }
    }

    /// Raw, undebounced level: true while the button is held down.  A pin
    /// that fails to read counts as released.
    pub fn is_active(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    /// Poll once per loop.  True exactly once for each press, after the
    /// level has been stable for the debounce window.
    pub fn is_pressed(&mut self, now: u32) -> bool {
        let level = self.is_active();
        if level != self.last_level {
            self.last_level = level;
            self.last_change = now;
        }

        let settled = now.wrapping_sub(self.last_change) >= u32::from(self.debounce_ms);
        if !settled || level == self.confirmed {
            return false;
        }
        self.confirmed = level;
        level
    }
}

/// A switch that only counts once it has been held for a while, so a click
/// does nothing.
pub struct HoldSwitch<P> {
    pin: P,
    engage_ms: u16,
    held_since: Option<u32>,
}

impl<P: InputPin> HoldSwitch<P> {
    pub fn new(pin: P, engage_ms: u16) -> Self {
        Self {
            pin,
            engage_ms,
            held_since: None,
        }
    }

    /// True while the switch has been continuously down for `engage_ms`.
    pub fn is_held(&mut self, now: u32) -> bool {
        if !self.pin.is_low().unwrap_or(false) {
            self.held_since = None;
            return false;
        }
        let since = *self.held_since.get_or_insert(now);
        now.wrapping_sub(since) >= u32::from(self.engage_ms)
    }
}
