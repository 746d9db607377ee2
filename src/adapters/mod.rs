//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to            |
//! |------------|----------------|------------------------|
//! | `hardware` | SensorPort     | DHT22 on GPIO          |
//! |            | ActuatorPort   | Heater relay GPIO      |
//! | `serial`   | TelemetryPort  | Telemetry UART         |
//! | `time`     | -              | ESP32 system timer     |

pub mod hardware;
pub mod serial;
pub mod time;
