//! GPIO / peripheral pin assignments for the proofing box controller.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line (open-drain, external 10 kΩ pull-up).
pub const DHT22_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Heater relay (HLS8L module)
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay closed = heating element energized.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Telemetry UART
// ---------------------------------------------------------------------------

/// UART peripheral carrying the telemetry stream.  UART0 stays on the
/// console so log output never interleaves with data lines.
pub const TELEMETRY_UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
