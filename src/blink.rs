//! LED blinking with an input selecting the rate.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::config::{FAST_PERIOD_MS, SLOW_PERIOD_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkConfig {
    pub slow_ms: u32,
    pub fast_ms: u32,
}

impl BlinkConfig {
    pub fn period_ms(&self, fast: bool) -> u32 {
        if fast {
            self.fast_ms
        } else {
            self.slow_ms
        }
    }
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            slow_ms: SLOW_PERIOD_MS,
            fast_ms: FAST_PERIOD_MS,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BlinkError<I, O> {
    /// Reading the rate select input failed.
    Input(I),
    /// Driving the LED failed.
    Output(O),
}

/// Drives `output` on and off, faster while `input` is high.
pub struct Blinker<I, O> {
    input: I,
    output: O,
    config: BlinkConfig,
    last_period: Option<u32>,
}

impl<I, O> Blinker<I, O>
where
    I: InputPin,
    O: OutputPin,
{
    pub fn new(input: I, output: O, config: BlinkConfig) -> Self {
        Self {
            input,
            output,
            config,
            last_period: None,
        }
    }

    /// Samples the input and returns the period to use for the next cycle.
    pub fn period_ms(&mut self) -> Result<u32, BlinkError<I::Error, O::Error>> {
        let fast = self.input.is_high().map_err(BlinkError::Input)?;
        let period = self.config.period_ms(fast);
        if self.last_period != Some(period) {
            debug!("blink period {} ms", period);
            self.last_period = Some(period);
        }
        Ok(period)
    }

    /// One full on/off cycle. Returns the period that was used.
    pub fn cycle<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<u32, BlinkError<I::Error, O::Error>> {
        let period = self.period_ms()?;

        self.output.set_high().map_err(BlinkError::Output)?;
        delay.delay_ms(period);
        self.output.set_low().map_err(BlinkError::Output)?;
        delay.delay_ms(period);

        Ok(period)
    }

    pub fn release(self) -> (I, O) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::counter::sim::SimCounter;
    use crate::delay::TickDelay;
    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct PinFault;

    impl embedded_hal::digital::Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct Switch<'a> {
        high: &'a Cell<bool>,
        broken: bool,
    }

    impl ErrorType for Switch<'_> {
        type Error = PinFault;
    }

    impl InputPin for Switch<'_> {
        fn is_high(&mut self) -> Result<bool, PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            Ok(self.high.get())
        }

        fn is_low(&mut self) -> Result<bool, PinFault> {
            self.is_high().map(|high| !high)
        }
    }

    struct Led<'a> {
        levels: &'a RefCell<Vec<bool>>,
    }

    impl ErrorType for Led<'_> {
        type Error = Infallible;
    }

    impl OutputPin for Led<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.borrow_mut().push(true);
            Ok(())
        }
    }

    /// Records requested delays instead of waiting.
    #[derive(Default)]
    struct Recorder {
        ms: Vec<u32>,
    }

    impl DelayNs for Recorder {
        fn delay_ns(&mut self, ns: u32) {
            self.ms.push(ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.ms.push(ms);
        }
    }

    #[test]
    fn default_rates() {
        let config = BlinkConfig::default();
        assert_eq!(config.period_ms(false), 1000);
        assert_eq!(config.period_ms(true), 250);
    }

    #[test]
    fn input_level_selects_period() {
        let high = Cell::new(false);
        let levels = RefCell::new(Vec::new());
        let mut blinker = Blinker::new(
            Switch {
                high: &high,
                broken: false,
            },
            Led { levels: &levels },
            BlinkConfig::default(),
        );

        assert_eq!(blinker.period_ms(), Ok(1000));
        high.set(true);
        assert_eq!(blinker.period_ms(), Ok(250));
        high.set(false);
        assert_eq!(blinker.period_ms(), Ok(1000));
    }

    #[test]
    fn cycle_drives_high_then_low() {
        let high = Cell::new(true);
        let levels = RefCell::new(Vec::new());
        let mut delay = Recorder::default();
        let mut blinker = Blinker::new(
            Switch {
                high: &high,
                broken: false,
            },
            Led { levels: &levels },
            BlinkConfig {
                slow_ms: 40,
                fast_ms: 10,
            },
        );

        assert_eq!(blinker.cycle(&mut delay), Ok(10));
        high.set(false);
        assert_eq!(blinker.cycle(&mut delay), Ok(40));

        assert_eq!(*levels.borrow(), [true, false, true, false]);
        assert_eq!(delay.ms, [10, 10, 40, 40]);
    }

    #[test]
    fn cycle_waits_on_tick_delay() {
        let high = Cell::new(true);
        let levels = RefCell::new(Vec::new());
        let counter = SimCounter::new(u16::MAX - 100, 1_000);
        let mut delay = TickDelay::new(&counter);
        let mut blinker = Blinker::new(
            Switch {
                high: &high,
                broken: false,
            },
            Led { levels: &levels },
            BlinkConfig::default(),
        );

        blinker.cycle(&mut delay).unwrap();

        assert!(counter.observed() >= 2 * 250);
        assert_eq!(*levels.borrow(), [true, false]);
    }

    #[test]
    fn input_fault_leaves_led_alone() {
        let high = Cell::new(true);
        let levels = RefCell::new(Vec::new());
        let mut delay = Recorder::default();
        let mut blinker = Blinker::new(
            Switch {
                high: &high,
                broken: true,
            },
            Led { levels: &levels },
            BlinkConfig::default(),
        );

        assert_eq!(blinker.cycle(&mut delay), Err(BlinkError::Input(PinFault)));
        assert!(levels.borrow().is_empty());
        assert!(delay.ms.is_empty());

        let (switch, _led) = blinker.release();
        assert!(switch.broken);
    }
}
