//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (DHT22, relay, telemetry UART) implement these traits.
//! The [`Controller`](super::service::Controller) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One temperature/humidity sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleReading {
    /// Relative humidity (%).
    pub humidity_pct: f32,
    /// Ambient temperature (°C).
    pub temperature_c: f32,
}

/// Read-side port: the domain calls this once per loop iteration.
pub trait SensorPort {
    /// Produce a fresh reading, or the reason none is available.
    fn read(&mut self) -> Result<SampleReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the heating element.  Fire-and-forget: the domain
/// never reads the output back.
pub trait ActuatorPort {
    fn set_energized(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → serial line)
// ───────────────────────────────────────────────────────────────

/// Append-only text sink.  The adapter terminates each line.
pub trait TelemetryPort {
    fn write_line(&mut self, line: &str);
}
