//! Common test utilities and captured status messages

// Shared across test files; not every item is used in every file
#[allow(unused_imports)]
pub use chrono::{DateTime, FixedOffset, TimeZone, Utc};
#[allow(unused_imports)]
pub use mysentry_lib::{DecodeError, GlucoseTrend, PumpStatus, SensorReading};

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Vec<u8> {
    hex::decode(hex_data).expect("Failed to decode hex")
}

/// Decode a hex message with UTC as the calendar
#[allow(dead_code)]
pub fn decode_utc(hex_data: &str) -> Result<PumpStatus, DecodeError> {
    PumpStatus::decode_with(&hex_to_bytes(hex_data), &Utc)
}

/// Route decoder trace output to the test harness (RUST_LOG=trace to see it)
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap().fixed_offset()
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Active sensor, flat trend, calibration due at 19:13 the same day
#[allow(dead_code)]
pub const STATUS_ACTIVE: &str = "c951092c1e0f090401323300037a020205b01830132b00d100000070092b000f09040000";

/// Sensor ended, calibration hour 0xff
#[allow(dead_code)]
pub const STATUS_ENDED: &str = "fb511205000f090601050502000004000000ff00ffff0040000000711205000f09060000";

/// Sensor off, zeroed glucose date
#[allow(dead_code)]
pub const STATUS_OFF: &str = "ff501219000f09060100000000000400000000000000005e000000720000000000000000";

/// Sensor off, a later broadcast of the same pump
#[allow(dead_code)]
pub const STATUS_OFF_LATER: &str = "01501223000f090601000000000004000000000000000059000000720000000000000000";

/// Both glucose overflow bits set
#[allow(dead_code)]
pub const STATUS_OVERFLOW: &str = "2f511727070f09050184850000cd010105b03e0a0a1a009d030000711726000f09050000";

/// Just after midnight
#[allow(dead_code)]
pub const STATUS_MIDNIGHT: &str = "9c510003310f090501393700025b0101068d262208150034000000700003000f09050000";

/// Current reading is a calibration error, previous reading active
#[allow(dead_code)]
pub const STATUS_CAL_ERROR: &str = "87510f18150f090701037100045e0402072c0444ffff005e020000730f16000f09070000";

#[allow(dead_code)]
pub const ALL_STATUS_MESSAGES: &[&str] = &[
    STATUS_ACTIVE,
    STATUS_ENDED,
    STATUS_OFF,
    STATUS_OFF_LATER,
    STATUS_OVERFLOW,
    STATUS_MIDNIGHT,
    STATUS_CAL_ERROR,
];
