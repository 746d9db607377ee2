//! Control loop: the hexagonal core.
//!
//! [`Controller`] owns the set-point, the telemetry tick accumulator, the
//! sample index and the last commanded heater state.  All I/O flows
//! through port traits injected at call sites, making the whole loop
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ TelemetryPort
//!                 │       Controller        │
//! ActuatorPort ◀──│  threshold · rate limit │
//!                 └────────────────────────┘
//! ```
//!
//! One iteration is: read → threshold decision → relay write →
//! (maybe) telemetry record → tick accumulator advance → fixed sleep.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::SensorError;

use super::events::{READ_FAILURE_LINE, TelemetryRecord};
use super::ports::{ActuatorPort, SampleReading, SensorPort, TelemetryPort};

/// What a single loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The sensor answered; `record` is set when a telemetry line went out.
    Sampled {
        reading: SampleReading,
        record: Option<TelemetryRecord>,
    },
    /// The sensor failed; only the diagnostic line was written.
    ReadFailed(SensorError),
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

/// Bang-bang heater regulator with rate-limited telemetry.
pub struct Controller {
    config: ControllerConfig,
    /// Milliseconds accumulated since the last telemetry record.
    tick_ms: u32,
    /// Index stamped on the next telemetry record.
    sample_index: u32,
    /// Last value written to the relay.
    heater_on: bool,
    iterations: u64,
}

impl Controller {
    /// Construct the controller.  Does **not** touch the relay; call
    /// [`start`](Self::start) once the actuator is available.
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            tick_ms: 0,
            sample_index: 0,
            heater_on: false,
            iterations: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the relay to its de-energized default.
    pub fn start(&mut self, hw: &mut impl ActuatorPort) {
        hw.set_energized(false);
        self.heater_on = false;
        info!(
            "Controller started: target={:.1}\u{00b0}C, poll={}ms, telemetry every {} ticks",
            self.config.target_temperature_c,
            self.config.poll_interval_ms,
            self.config.ticks_per_record(),
        );
    }

    /// Loop forever: [`cycle`](Self::cycle) back to back.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetryPort,
        delay: &mut impl DelayNs,
    ) -> ! {
        loop {
            self.cycle(hw, telemetry, delay);
        }
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One iteration followed by the fixed poll-interval sleep.
    pub fn cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetryPort,
        delay: &mut impl DelayNs,
    ) -> StepOutcome {
        let outcome = self.step(hw, telemetry);
        delay.delay_ms(self.config.poll_interval_ms);
        outcome
    }

    /// One iteration without the trailing sleep.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; the relay and the sensor live on the same
    /// adapter.
    pub fn step(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        telemetry: &mut impl TelemetryPort,
    ) -> StepOutcome {
        let outcome = match hw.read() {
            Ok(reading) => {
                self.regulate(reading.temperature_c, hw);
                let record = self.emit_if_due(&reading, telemetry);
                StepOutcome::Sampled { reading, record }
            }
            Err(e) => {
                // Relay and counters are left alone; the next iteration retries.
                warn!("Sensor read failed: {}", e);
                telemetry.write_line(READ_FAILURE_LINE);
                StepOutcome::ReadFailed(e)
            }
        };

        // Ticks advance on failed iterations too.
        self.tick_ms = self.tick_ms.wrapping_add(self.config.poll_interval_ms);
        self.iterations += 1;
        outcome
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the relay was last commanded on.
    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    /// Milliseconds accumulated towards the next telemetry record.
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Index the next telemetry record will carry.
    pub fn sample_index(&self) -> u32 {
        self.sample_index
    }

    /// Iterations executed since construction.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ── Internal ──────────────────────────────────────────────

    /// Two independent comparisons.  A reading exactly on target (or NaN)
    /// fires neither, so the relay keeps its previous state.
    fn regulate(&mut self, temperature_c: f32, hw: &mut impl ActuatorPort) {
        let target = self.config.target_temperature_c;
        if temperature_c < target {
            hw.set_energized(true);
            self.record_heater(true, temperature_c);
        }
        if temperature_c > target {
            hw.set_energized(false);
            self.record_heater(false, temperature_c);
        }
    }

    fn record_heater(&mut self, on: bool, temperature_c: f32) {
        if self.heater_on != on {
            info!(
                "Heater {} at {:.1}\u{00b0}C (target {:.1}\u{00b0}C)",
                if on { "ON" } else { "OFF" },
                temperature_c,
                self.config.target_temperature_c,
            );
        }
        self.heater_on = on;
    }

    /// Exact-equality check: if the due iteration fails, the accumulator
    /// runs past the threshold and no further record goes out until it
    /// wraps around.
    fn emit_if_due(
        &mut self,
        reading: &SampleReading,
        telemetry: &mut impl TelemetryPort,
    ) -> Option<TelemetryRecord> {
        if self.tick_ms != self.config.telemetry_threshold_ms {
            return None;
        }
        self.tick_ms = 0;

        let record = TelemetryRecord {
            index: self.sample_index,
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
        };
        telemetry.write_line(&record.to_line());
        debug!("TELEM | {}", record);

        self.sample_index = self.sample_index.wrapping_add(1);
        Some(record)
    }
}
