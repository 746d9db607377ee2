//! Telemetry UART writer.
//!
//! Exposes the UART installed by hw_init as a `core::fmt::Write` so the
//! serial telemetry adapter can format straight into it.

use core::fmt;

use crate::drivers::hw_init;

#[derive(Default)]
pub struct UartWriter;

impl UartWriter {
    /// The UART driver must already be installed by
    /// [`hw_init::init_peripherals`].
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Write for UartWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if hw_init::uart_write(s.as_bytes()) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}
