//! Sensor drivers.
//!
//! The proofing box has a single combined temperature/humidity sensor;
//! the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter)
//! owns it and exposes it through the sensor port.

pub mod dht22;
