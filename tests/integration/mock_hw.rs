//! Mock hardware adapters for integration tests.
//!
//! `ScriptedHardware` replays a fixed sequence of sensor outcomes and
//! records every relay command so tests can assert on the full history
//! without touching real GPIO registers.

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use proofbox::app::ports::{ActuatorPort, SampleReading, SensorPort, TelemetryPort};
use proofbox::error::SensorError;

pub const HUMIDITY: f32 = 61.5;

/// One scripted sensor outcome.
pub type Reading = Result<SampleReading, SensorError>;

/// Successful read at `temperature_c` with the fixed test humidity.
pub fn ok(temperature_c: f32) -> Reading {
    Ok(SampleReading {
        humidity_pct: HUMIDITY,
        temperature_c,
    })
}

pub fn fail() -> Reading {
    Err(SensorError::Timeout)
}

// ── ScriptedHardware ──────────────────────────────────────────

pub struct ScriptedHardware {
    script: VecDeque<Reading>,
    /// Every `set_energized` call, in order.
    pub relay_writes: Vec<bool>,
    /// Number of sensor reads served.
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedHardware {
    pub fn new(script: impl IntoIterator<Item = Reading>) -> Self {
        Self {
            script: script.into_iter().collect(),
            relay_writes: Vec::new(),
            reads: 0,
        }
    }

    /// Current relay level; an unwritten relay is de-energized.
    pub fn relay_on(&self) -> bool {
        self.relay_writes.last().copied().unwrap_or(false)
    }

    pub fn push(&mut self, reading: Reading) {
        self.script.push_back(reading);
    }
}

impl SensorPort for ScriptedHardware {
    fn read(&mut self) -> Reading {
        self.reads += 1;
        self.script
            .pop_front()
            .expect("sensor script exhausted")
    }
}

impl ActuatorPort for ScriptedHardware {
    fn set_energized(&mut self, on: bool) {
        self.relay_writes.push(on);
    }
}

// ── RecordingTelemetry ────────────────────────────────────────

#[derive(Default)]
pub struct RecordingTelemetry {
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines that are not the read-failure diagnostic.
    pub fn data_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|l| *l != proofbox::app::events::READ_FAILURE_LINE)
            .collect()
    }
}

impl TelemetryPort for RecordingTelemetry {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}

// ── MockDelay ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
