/// Arduino style `millis()` on Timer/Counter 0.
///
/// https://www.arduino.cc/reference/en/language/functions/time/millis/
///
/// TC0 runs in CTC mode and its compare match interrupt adds the interval to a
/// global millisecond counter.
///
/// Based on https://blog.rahix.de/005-avr-hal-millis/
///
/// License assumed to be MIT based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-millis.rs
use avr_device::interrupt::Mutex;
use core::cell;

use voltmeterclock::hal::Millis;

// Possible Values:
//
// ╔═══════════╦══════════════╦═══════════════════╗
// ║ PRESCALER ║ TIMER_COUNTS ║ Overflow Interval ║
// ╠═══════════╬══════════════╬═══════════════════╣
// ║        64 ║          250 ║              1 ms ║
// ║       256 ║          125 ║              2 ms ║
// ║       256 ║          250 ║              4 ms ║
// ║      1024 ║          125 ║              8 ms ║
// ║      1024 ║          250 ║             16 ms ║
// ╚═══════════╩══════════════╩═══════════════════╝
//
// The sync engine interpolates whole milliseconds, so tick every 1 ms.
const PRESCALER: u32 = 64;
const TIMER_COUNTS: u32 = 250;

const MILLIS_INCREMENT: u32 = PRESCALER * TIMER_COUNTS / 16000;

static MILLIS_COUNTER: Mutex<cell::Cell<u32>> = Mutex::new(cell::Cell::new(0));

/// Timer/Counter 0 Compare Match A interrupt service routine.
#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter_cell = MILLIS_COUNTER.borrow(cs);
        let counter = counter_cell.get();
        counter_cell.set(counter.wrapping_add(MILLIS_INCREMENT));
    })
}

/// Milliseconds counted since `init_tc0()` was called.  Wraps after about
/// 49.7 days.
pub fn millis() -> u32 {
    avr_device::interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get())
}

/// Handle on the TC0 counter for the controller.
pub struct Tc0Millis;

impl Millis for Tc0Millis {
    fn millis(&self) -> u32 {
        millis()
    }
}

/// Initialise Timer/Counter 0 for counting milliseconds.
/// Configures the TC0 timer for the interval defined by consts PRESCALER and TIMER_COUNTS (in CTC mode).
// https://blog.rahix.de/005-avr-hal-millis/
pub fn init_tc0(tc0: arduino_hal::pac::TC0) -> Tc0Millis {
    // Clear Timer on Compare mode, interrupting on TIMER0_COMPA.
    tc0.tccr0a.write(|w| w.wgm0().ctc());

    // OCR0A counts from 0, so the period is one more than the register.
    tc0.ocr0a.write(|w| w.bits((TIMER_COUNTS - 1) as u8));

    tc0.tccr0b.write(|w| match PRESCALER {
        8 => w.cs0().prescale_8(),
        64 => w.cs0().prescale_64(),
        256 => w.cs0().prescale_256(),
        1024 => w.cs0().prescale_1024(),
        _ => w.cs0().direct(),
    });

    // From here on the ISR runs once interrupts are enabled.
    tc0.timsk0.write(|w| w.ocie0a().set_bit());

    avr_device::interrupt::free(|cs| {
        MILLIS_COUNTER.borrow(cs).set(0);
    });
    Tc0Millis
}
