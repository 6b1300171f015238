// Based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-panic.rs
// License MIT

/// Report the panic location on the serial console, then halt with the dials
/// wherever the DAC last left them.
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    avr_device::interrupt::disable();

    // SAFETY: we're never returning so stealing the peripherals is ok
    let dp = unsafe { arduino_hal::Peripherals::steal() };
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let _ = ufmt::uwriteln!(&mut serial, "voltmeterclock panicked\r");
    if let Some(loc) = info.location() {
        let _ = ufmt::uwriteln!(
            &mut serial,
            " at {}:{}:{}\r",
            loc.file(),
            loc.line(),
            loc.column(),
        );
    }
    loop {
        avr_device::asm::sleep();
    }
}
