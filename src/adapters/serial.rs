//! Serial telemetry adapter.
//!
//! Implements [`TelemetryPort`] over any `core::fmt::Write`; the
//! telemetry UART on the device, a `String` in tests.  Each line is
//! terminated with `\n` and handed to the writer in a single `write_str`,
//! so a failed write never leaves half a line on the wire.  Write failures
//! are logged and dropped; the control loop never waits on the serial line.

use core::fmt::Write;

use log::warn;

use crate::app::events::MAX_LINE_LEN;
use crate::app::ports::TelemetryPort;

/// Longest telemetry line plus its terminator.
const LINE_BUF_LEN: usize = MAX_LINE_LEN + 1;

pub struct SerialTelemetry<W: Write> {
    out: W,
    dropped: u32,
}

impl<W: Write> SerialTelemetry<W> {
    pub fn new(out: W) -> Self {
        Self { out, dropped: 0 }
    }

    /// Lines that failed to reach the writer.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> TelemetryPort for SerialTelemetry<W> {
    fn write_line(&mut self, line: &str) {
        let mut buf = heapless::String::<LINE_BUF_LEN>::new();
        if buf.push_str(line).and_then(|()| buf.push('\n')).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Telemetry line of {} bytes exceeds {}, dropped", line.len(), MAX_LINE_LEN);
            return;
        }

        if let Err(e) = self.out.write_str(&buf) {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Telemetry write failed ({}), line dropped", e);
        }
    }
}
