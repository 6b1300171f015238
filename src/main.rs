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
// along with this library.  If not, see <http://www.gnu.org/licenses/>.//! Entry point for the Arduino Nano board.
//!
//! Pin map:
//!
//! * D2, D3, D4: hour, minute and second buttons.
//! * D5, D6, D7: hold to pin the dials to zero, mid and full scale.
//! * A4, A5: I2C, shared by the DS3231 (0x68) and the MCP4728 (0x60).
//! * MCP4728 channel A hour meter, B minute meter, C second meter.
//!
//! Every switch is pulled up and closes to ground.  The serial console runs at
//! 57600 baud.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(all(target_arch = "avr", feature = "panic-serial"))]
mod panic;
#[cfg(all(target_arch = "avr", not(feature = "panic-serial")))]
use panic_halt as _;

#[cfg(target_arch = "avr")]
mod timer;

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    use core::cell::RefCell;

    use embedded_hal_bus::i2c::RefCellDevice;
    use voltmeterclock::adjust::{AdjustButtons, CalibrationSwitches};
    use voltmeterclock::button::{Button, HoldSwitch};
    use voltmeterclock::controller::ClockController;
    use voltmeterclock::ds3231::Ds3231;
    use voltmeterclock::mcp4728::{Gain, Mcp4728, Reference};
    use voltmeterclock::settings::Settings;

    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let millis = timer::init_tc0(dp.TC0);
    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    let i2c = RefCell::new(arduino_hal::I2c::new(
        dp.TWI,
        pins.a4.into_pull_up_input(),
        pins.a5.into_pull_up_input(),
        400_000,
    ));
    let rtc = Ds3231::new(RefCellDevice::new(&i2c));
    // Internal 2.048 V reference at 2x gain: one code per millivolt.
    let dac = Mcp4728::new(RefCellDevice::new(&i2c), Reference::Internal(Gain::X2));

    let settings = Settings::default();
    let buttons = AdjustButtons::new(
        Button::new(pins.d2.into_pull_up_input().downgrade(), settings.debounce_ms),
        Button::new(pins.d3.into_pull_up_input().downgrade(), settings.debounce_ms),
        Button::new(pins.d4.into_pull_up_input().downgrade(), settings.debounce_ms),
    );
    let calibration = CalibrationSwitches::new(
        HoldSwitch::new(pins.d5.into_pull_up_input().downgrade(), settings.hold_engage_ms),
        HoldSwitch::new(pins.d6.into_pull_up_input().downgrade(), settings.hold_engage_ms),
        HoldSwitch::new(pins.d7.into_pull_up_input().downgrade(), settings.hold_engage_ms),
    );

    let mut clock = ClockController::new(
        rtc,
        dac,
        buttons,
        calibration,
        millis,
        arduino_hal::Delay::new(),
        &settings,
    );

    loop {
        if let Err(e) = clock.tick(&mut serial) {
            let _ = ufmt::uwriteln!(&mut serial, "{}\r", e);
            // Nothing to show without the RTC or DAC: stop for good.
            avr_device::interrupt::disable();
            loop {
                avr_device::asm::sleep();
            }
        }
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("voltmeterclock runs on the ATmega328P; build it for the avr-atmega328p target");
}
