//! Outbound telemetry records.
//!
//! The [`Controller`](super::service::Controller) renders these onto the
//! [`TelemetryPort`](super::ports::TelemetryPort).  The text layout is the
//! contract with the capture tool on the other end of the serial cable.

use core::fmt;
use core::fmt::Write as _;

/// Diagnostic line written on every failed sensor read.  The spelling is
/// kept as-is so existing capture scripts keep matching it.
pub const READ_FAILURE_LINE: &str = "Failed to get temprature and humidity value.";

/// Longest line a [`TelemetryRecord`] can render to: a ten-digit index
/// and two `-f32::MAX` values at one decimal (42 chars each), plus two
/// separators.
pub const MAX_LINE_LEN: usize = 96;

/// A rate-limited sample record: `<index> <temperature> <humidity>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    pub index: u32,
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl TelemetryRecord {
    /// Render the record into a stack buffer.
    pub fn to_line(&self) -> heapless::String<MAX_LINE_LEN> {
        let mut buf = heapless::String::new();
        // Cannot overflow: MAX_LINE_LEN covers any u32 and any f32.
        let _ = write!(buf, "{self}");
        buf
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.1} {:.1}",
            self.index, self.temperature_c, self.humidity_pct
        )
    }
}
