//! Overflow-safe busy-wait delays on a free-running hardware counter, and the
//! blink loop built on top of them.

#![no_std]

pub mod blink;
pub mod config;
pub mod counter;
pub mod delay;

pub use blink::{BlinkConfig, BlinkError, Blinker};
pub use counter::{TickCounter, TickWord, Truncated};
pub use delay::TickDelay;
