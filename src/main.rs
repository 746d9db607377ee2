//! Proofbox Firmware: Main Entry Point
//!
//! Bang-bang heater regulation for a bread-proofing box.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter            SerialTelemetry              │
//! │  (DHT22 + relay)            (UART1, 9600 baud)           │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          Controller (pure logic)               │      │
//! │  │  threshold decision · telemetry rate limit     │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  FreeRtos delay (fixed 50 ms cadence)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use proofbox::adapters::hardware::HardwareAdapter;
use proofbox::adapters::serial::SerialTelemetry;
use proofbox::adapters::time::Esp32TimeAdapter;
use proofbox::app::service::Controller;
use proofbox::config::ControllerConfig;
use proofbox::drivers::hw_init;
use proofbox::drivers::relay::RelayDriver;
use proofbox::drivers::uart::UartWriter;
use proofbox::pins;
use proofbox::sensors::dht22::Dht22Sensor;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Proofbox v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compile-time defaults) ──────────────
    let config = ControllerConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.serial_baud)?;

    // ── 4. Adapters ───────────────────────────────────────────
    let dht = Dht22Sensor::new(pins::DHT22_GPIO, config.sensor_min_interval_ms);
    info!("DHT22 on GPIO{}, relay on GPIO{}", dht.gpio(), pins::RELAY_GPIO);

    let mut hw = HardwareAdapter::new(
        dht,
        RelayDriver::new(pins::RELAY_GPIO),
        Esp32TimeAdapter::new(),
    );
    let mut telemetry = SerialTelemetry::new(UartWriter::new());
    let mut delay = FreeRtos;

    // ── 5. Control loop ───────────────────────────────────────
    let mut controller = Controller::new(config);
    controller.start(&mut hw);

    info!("System ready. Entering control loop.");
    controller.run(&mut hw, &mut telemetry, &mut delay)
}
