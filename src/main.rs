//! Blinks an LED, faster while the input is held high.
//!
//! The following wiring is assumed:
//! - LED => GPIO8
//! - INPUT => GPIO2 -> 3V3 (pulled down when open)
//!
//! Delays busy-wait on the low 32 bits of the system timer.

#![no_std]
#![no_main]

use esp32_c3_tick_blinky::{
    config::TIMER_TICKS_PER_SECOND,
    BlinkConfig, Blinker, TickCounter, TickDelay, Truncated,
};
use esp_backtrace as _;
use esp_hal::{
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    main, time,
};
use esp_println::println;
use log::info;

/// Microseconds since boot, counted by the system timer.
struct Uptime;

impl TickCounter for Uptime {
    type Word = u64;

    #[inline(always)]
    fn now(&self) -> u64 {
        time::Instant::now().duration_since_epoch().as_micros()
    }

    fn ticks_per_second(&self) -> u32 {
        TIMER_TICKS_PER_SECOND
    }
}

#[main]
fn main() -> ! {
    println!("Init!");
    // starts the system timer, Uptime reads 0 before this
    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_println::logger::init_logger_from_env();

    let out_config = OutputConfig::default();
    let led = Output::new(peripherals.GPIO8, Level::Low, out_config);
    let in_config = InputConfig::default().with_pull(Pull::Down);
    let input = Input::new(peripherals.GPIO2, in_config);

    let mut delay = TickDelay::new(Truncated::<_, u32>::new(Uptime));
    let mut blinker = Blinker::new(input, led, BlinkConfig::default());

    info!("blinking LED, timer at {} ticks/s", delay.ticks_per_second());

    loop {
        blinker.cycle(&mut delay).expect("GPIO access failed");
    }
}
