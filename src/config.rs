// global config

/// Toggle period while the input is low.
pub const SLOW_PERIOD_MS: u32 = 1000;
/// Toggle period while the input is held high.
pub const FAST_PERIOD_MS: u32 = 250;

/// Rate of the system timer as seen through `esp_hal::time::Instant`.
pub const TIMER_TICKS_PER_SECOND: u32 = 1_000_000;
