//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the DHT22 driver, the relay driver and the monotonic clock the
//! sensor's read window is measured against, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, SampleReading, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::dht22::Dht22Sensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    dht: Dht22Sensor,
    relay: RelayDriver,
    clock: Esp32TimeAdapter,
}

impl HardwareAdapter {
    pub fn new(dht: Dht22Sensor, relay: RelayDriver, clock: Esp32TimeAdapter) -> Self {
        Self { dht, relay, clock }
    }

    pub fn relay(&self) -> &RelayDriver {
        &self.relay
    }

    pub fn sensor_mut(&mut self) -> &mut Dht22Sensor {
        &mut self.dht
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read(&mut self) -> Result<SampleReading, SensorError> {
        self.dht.read(self.clock.uptime_ms())
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_energized(&mut self, on: bool) {
        self.relay.set(on);
    }
}
