//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the regulation rules for the proofing box:
//! threshold heater control and rate-limited telemetry.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
