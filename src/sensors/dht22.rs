//! DHT22 (AM2302) temperature / humidity sensor on a single-wire bus.
//!
//! A transaction is a host start pulse followed by 40 bits from the
//! sensor: humidity ×10 (16 bit), temperature ×10 (15 bit magnitude plus
//! sign bit), and an additive checksum byte.  Bit values are encoded in
//! the length of the high phase (~27 µs = 0, ~70 µs = 1).
//!
//! The sensor needs 2 s between conversions.  Reads inside that window
//! repeat the outcome of the previous transaction instead of hitting the
//! bus again.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the open-drain GPIO configured by hw_init.
//! On host/test: frames are injected with [`Dht22Sensor::sim_set_frame`].

use crate::app::ports::SampleReading;
use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Raw bus frame: `[hum_hi, hum_lo, temp_hi, temp_lo, checksum]`.
pub type Frame = [u8; 5];

const SIGN_BIT: u8 = 0x80;

/// Decode and checksum-verify a raw frame.
pub fn decode_frame(frame: &Frame) -> Result<SampleReading, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_raw = u16::from_be_bytes([frame[0], frame[1]]);
    let temp_raw = u16::from_be_bytes([frame[2] & !SIGN_BIT, frame[3]]);

    let mut temperature_c = f32::from(temp_raw) / 10.0;
    if frame[2] & SIGN_BIT != 0 {
        temperature_c = -temperature_c;
    }

    Ok(SampleReading {
        humidity_pct: f32::from(humidity_raw) / 10.0,
        temperature_c,
    })
}

/// Build the frame a sensor would send for `reading`.  Simulation only.
#[cfg(not(target_os = "espidf"))]
pub fn encode_frame(reading: SampleReading) -> Frame {
    let humidity = (reading.humidity_pct * 10.0).round() as u16;
    let temp_mag = (reading.temperature_c.abs() * 10.0).round() as u16 & 0x7FFF;
    let [h_hi, h_lo] = humidity.to_be_bytes();
    let [mut t_hi, t_lo] = temp_mag.to_be_bytes();
    if reading.temperature_c < 0.0 {
        t_hi |= SIGN_BIT;
    }
    let sum = h_hi
        .wrapping_add(h_lo)
        .wrapping_add(t_hi)
        .wrapping_add(t_lo);
    [h_hi, h_lo, t_hi, t_lo, sum]
}

// ── Bus timing (µs) ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
const START_LOW_US: u32 = 3000;
#[cfg(target_os = "espidf")]
const START_RELEASE_US: u32 = 25;
#[cfg(target_os = "espidf")]
const RESPONSE_MAX_US: u32 = 85;
#[cfg(target_os = "espidf")]
const BIT_LOW_MAX_US: u32 = 56;
#[cfg(target_os = "espidf")]
const BIT_HIGH_MAX_US: u32 = 75;
/// High phases longer than this are a `1`.
#[cfg(target_os = "espidf")]
const ONE_THRESHOLD_US: u32 = 40;

pub struct Dht22Sensor {
    gpio: i32,
    min_interval_ms: u64,
    /// Timestamp and outcome of the last bus transaction.
    last: Option<(u64, Result<SampleReading, SensorError>)>,
    transactions: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_frame: Option<Frame>,
}

impl Dht22Sensor {
    pub fn new(gpio: i32, min_interval_ms: u32) -> Self {
        Self {
            gpio,
            min_interval_ms: u64::from(min_interval_ms),
            last: None,
            transactions: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_frame: None,
        }
    }

    /// Read at monotonic time `now_ms`.  The first call always talks to
    /// the sensor; later calls inside the minimum interval return the
    /// cached outcome.
    pub fn read(&mut self, now_ms: u64) -> Result<SampleReading, SensorError> {
        if let Some((at, outcome)) = self.last {
            if now_ms.wrapping_sub(at) < self.min_interval_ms {
                return outcome;
            }
        }

        let outcome = self.capture_frame().and_then(|frame| decode_frame(&frame));
        self.transactions = self.transactions.wrapping_add(1);
        self.last = Some((now_ms, outcome));
        outcome
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Bus transactions performed so far.
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// Inject the frame the next bus transaction returns; `None`
    /// simulates a sensor that never answers.
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_set_frame(&mut self, frame: Option<Frame>) {
        self.sim_frame = frame;
    }

    #[cfg(not(target_os = "espidf"))]
    fn capture_frame(&mut self) -> Result<Frame, SensorError> {
        self.sim_frame.ok_or(SensorError::Timeout)
    }

    #[cfg(target_os = "espidf")]
    fn capture_frame(&mut self) -> Result<Frame, SensorError> {
        let pin = self.gpio;
        let mut frame: Frame = [0; 5];

        // Start pulse: hold low, then release to the pull-up.
        hw_init::gpio_write(pin, false);
        hw_init::delay_us(START_LOW_US);
        hw_init::gpio_write(pin, true);
        hw_init::delay_us(START_RELEASE_US);

        // Sensor acknowledges with ~80 µs low then ~80 µs high.
        wait_while(pin, false, RESPONSE_MAX_US)?;
        wait_while(pin, true, RESPONSE_MAX_US)?;

        for bit in 0..40 {
            wait_while(pin, false, BIT_LOW_MAX_US)?;
            let high_us = wait_while(pin, true, BIT_HIGH_MAX_US)?;
            if high_us > ONE_THRESHOLD_US {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }

        Ok(frame)
    }
}

/// Spin while the line sits at `level`; returns how long that took.
#[cfg(target_os = "espidf")]
fn wait_while(pin: i32, level: bool, max_us: u32) -> Result<u32, SensorError> {
    let mut elapsed = 0;
    while hw_init::gpio_read(pin) == level {
        if elapsed > max_us {
            return Err(SensorError::Timeout);
        }
        elapsed += 1;
        hw_init::delay_us(1);
    }
    Ok(elapsed)
}
