//! Controller configuration parameters
//!
//! The regulator has no runtime configuration surface: the firmware boots
//! with [`ControllerConfig::default()`]. The struct exists so the timing
//! constants live in one place and tests can exercise other values.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Regulation ---
    /// Set-point the heater tracks (Celsius)
    pub target_temperature_c: f32,

    // --- Timing ---
    /// Delay between loop iterations (milliseconds)
    pub poll_interval_ms: u32,
    /// Accumulated tick time at which a telemetry record is emitted (milliseconds)
    pub telemetry_threshold_ms: u32,
    /// Minimum spacing between DHT22 bus transactions (milliseconds)
    pub sensor_min_interval_ms: u32,

    // --- Serial ---
    /// Telemetry UART baud rate
    pub serial_baud: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            target_temperature_c: 24.0,

            poll_interval_ms: 50,
            telemetry_threshold_ms: 500, // every 10 ticks
            sensor_min_interval_ms: 2000,

            serial_baud: 9600,
        }
    }
}

impl ControllerConfig {
    /// Reject parameter combinations the control loop cannot honour.
    ///
    /// The emission check is an exact equality on the tick accumulator, so
    /// a threshold that is not a multiple of the poll interval would never
    /// fire.
    pub fn validate(&self) -> Result<()> {
        if !self.target_temperature_c.is_finite() {
            return Err(Error::Config("target temperature must be finite"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll interval must be non-zero"));
        }
        if self.telemetry_threshold_ms == 0
            || self.telemetry_threshold_ms % self.poll_interval_ms != 0
        {
            return Err(Error::Config(
                "telemetry threshold must be a positive multiple of the poll interval",
            ));
        }
        if self.serial_baud == 0 {
            return Err(Error::Config("serial baud rate must be non-zero"));
        }
        Ok(())
    }

    /// Loop iterations between two telemetry records.
    pub fn ticks_per_record(&self) -> u32 {
        self.telemetry_threshold_ms / self.poll_interval_ms
    }
}
