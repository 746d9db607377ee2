//! Fuzz target: `decode_frame`
//!
//! Feeds arbitrary 5-byte bus captures into the DHT22 frame decoder and
//! asserts that it never panics and that every accepted frame carries a
//! matching checksum and in-range values.
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use libfuzzer_sys::fuzz_target;
use proofbox::sensors::dht22::{Frame, decode_frame};

fuzz_target!(|frame: Frame| {
    if let Ok(reading) = decode_frame(&frame) {
        let sum = frame[..4].iter().fold(0u8, |a, b| a.wrapping_add(*b));
        assert_eq!(sum, frame[4], "decoder accepted a bad checksum");
        assert!(reading.humidity_pct.is_finite() && reading.humidity_pct >= 0.0);
        assert!(reading.temperature_c.is_finite());
    }
});
