//! Heating-element relay driver (HLS8L module).
//!
//! A single digital output: HIGH closes the relay and energizes the
//! heater, LOW opens it.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Open,
    Closed,
}

pub struct RelayDriver {
    gpio: i32,
    state: RelayState,
}

impl RelayDriver {
    /// The pin is expected to be configured (and driven low) by hw_init.
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: RelayState::Open,
        }
    }

    pub fn set(&mut self, energized: bool) {
        hw_init::gpio_write(self.gpio, energized);
        self.state = if energized {
            RelayState::Closed
        } else {
            RelayState::Open
        };
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_energized(&self) -> bool {
        self.state == RelayState::Closed
    }
}
