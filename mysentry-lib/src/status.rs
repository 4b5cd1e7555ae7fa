use std::fmt;

use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, trace};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::calendar::{Calendar, next_calibration};
use crate::constants::{
    BATTERY_FULL_RAW, GLUCOSE_OVERFLOW_SHIFT, IOB_SCALE, PREVIOUS_GLUCOSE_OVERFLOW_SHIFT,
    RESERVOIR_SCALE, STATUS_MESSAGE_LENGTH,
};
use crate::date::PackedDate;
use crate::error::DecodeError;
use crate::field::{be_uint, stitch_glucose};
use crate::reading::SensorReading;
use crate::trend::GlucoseTrend;

/// Wire layout of the status message body.
///
/// ```text
/// 00 01 020304050607 08 09 10 11 1213 14 151617 18 19 20 21 2223 24 2526 27 282930313233 3435
/// se tr  pump date   ?? bh ph d1 resv bt  diag  st sr nc ?? iob  bl diag d3  sensor date  0000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct StatusMessageRaw {
    pub sequence: u8,
    pub trend_status: u8,
    pub pump_date: PackedDate,
    pub unknown_8: u8,
    pub glucose_low: u8,
    pub previous_glucose_low: u8,
    pub diag_11: [u8; 1],
    pub reservoir_raw: [u8; 2], // 0.1 U
    pub battery_raw: u8,        // 4 = full
    pub diag_15_17: [u8; 3],
    pub sensor_age_hours: u8,
    pub sensor_remaining_hours: u8,
    pub next_calibration_hour: u8,
    pub unknown_21: u8,
    pub iob_raw: [u8; 2],      // 0.025 U
    pub glucose_overflow: u8, // bit 0: current, bit 1: previous
    pub diag_25_26: [u8; 2],
    pub diag_27: [u8; 1],
    pub glucose_date: PackedDate,
    pub reserved: [u8; 2],
}

const _: () = assert!(size_of::<StatusMessageRaw>() == STATUS_MESSAGE_LENGTH);

/// Decoded snapshot of the pump's state from one status message.
///
/// Equality compares only the pump date and the glucose date.
#[derive(Debug, Clone)]
pub struct PumpStatus {
    pump_date: DateTime<FixedOffset>,
    battery_remaining_percent: u16,
    iob: f64,
    reservoir_remaining: f64,
    glucose_trend: GlucoseTrend,
    glucose: SensorReading,
    previous_glucose: SensorReading,
    glucose_date: Option<DateTime<FixedOffset>>,
    sensor_age_hours: u8,
    sensor_remaining_hours: u8,
    next_sensor_calibration: Option<DateTime<FixedOffset>>,
    raw: StatusMessageRaw,
}

impl PumpStatus {
    /// Decode a 36-byte status message, interpreting dates in the local time zone.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with(bytes, &Local)
    }

    /// Decode a 36-byte status message, interpreting dates with `calendar`.
    ///
    /// Fails if the length is wrong, the trend bits are unrecognised or the
    /// pump date is invalid. An invalid glucose date or an unresolvable next
    /// calibration only leaves that field empty.
    pub fn decode_with<C: Calendar + ?Sized>(bytes: &[u8], calendar: &C) -> Result<Self, DecodeError> {
        trace!(raw = %hex::encode(bytes), "Decoding pump status message");

        let raw = StatusMessageRaw::read_from_bytes(bytes).map_err(|_| DecodeError::MalformedLength {
            expected: STATUS_MESSAGE_LENGTH,
            actual: bytes.len(),
        })?;

        let glucose_trend = GlucoseTrend::from_status_byte(raw.trend_status)?;
        let pump_date = raw
            .pump_date
            .resolve(calendar)
            .ok_or(DecodeError::MalformedPumpDate)?;

        let reservoir_remaining = f64::from(be_uint(&raw.reservoir_raw)) * RESERVOIR_SCALE;
        let iob = f64::from(be_uint(&raw.iob_raw)) * IOB_SCALE;
        let battery_remaining_percent =
            (f64::from(raw.battery_raw) / BATTERY_FULL_RAW * 100.0).round() as u16;

        let glucose = SensorReading::from(stitch_glucose(
            raw.glucose_low,
            raw.glucose_overflow,
            GLUCOSE_OVERFLOW_SHIFT,
        ));
        let previous_glucose = SensorReading::from(stitch_glucose(
            raw.previous_glucose_low,
            raw.glucose_overflow,
            PREVIOUS_GLUCOSE_OVERFLOW_SHIFT,
        ));

        let glucose_date = match glucose {
            SensorReading::Off => None,
            _ => {
                let date = raw.glucose_date.resolve(calendar);
                if date.is_none() {
                    debug!(glucose_date = ?raw.glucose_date, "Unparsable glucose date");
                }
                date
            }
        };

        let next_sensor_calibration =
            next_calibration(calendar, &pump_date, raw.next_calibration_hour);

        Ok(PumpStatus {
            pump_date,
            battery_remaining_percent,
            iob,
            reservoir_remaining,
            glucose_trend,
            glucose,
            previous_glucose,
            glucose_date,
            sensor_age_hours: raw.sensor_age_hours,
            sensor_remaining_hours: raw.sensor_remaining_hours,
            next_sensor_calibration,
            raw,
        })
    }

    pub fn pump_date(&self) -> DateTime<FixedOffset> {
        self.pump_date
    }

    /// Battery level, `round(raw / 4 * 100)`. Not clamped, so raw values
    /// above 4 read above 100.
    pub fn battery_remaining_percent(&self) -> u16 {
        self.battery_remaining_percent
    }

    /// Insulin on board, in units
    pub fn iob(&self) -> f64 {
        self.iob
    }

    /// Reservoir volume, in units
    pub fn reservoir_remaining(&self) -> f64 {
        self.reservoir_remaining
    }

    pub fn glucose_trend(&self) -> GlucoseTrend {
        self.glucose_trend
    }

    pub fn glucose(&self) -> SensorReading {
        self.glucose
    }

    pub fn previous_glucose(&self) -> SensorReading {
        self.previous_glucose
    }

    /// Time of the current glucose reading. `None` when the sensor is off
    /// or the date could not be decoded.
    pub fn glucose_date(&self) -> Option<DateTime<FixedOffset>> {
        self.glucose_date
    }

    pub fn sensor_age_hours(&self) -> u8 {
        self.sensor_age_hours
    }

    pub fn sensor_remaining_hours(&self) -> u8 {
        self.sensor_remaining_hours
    }

    pub fn next_sensor_calibration(&self) -> Option<DateTime<FixedOffset>> {
        self.next_sensor_calibration
    }

    /// Undecoded byte 11
    pub fn byte_11(&self) -> &[u8] {
        &self.raw.diag_11
    }

    /// Undecoded bytes 15..=17
    pub fn bytes_15_17(&self) -> &[u8] {
        &self.raw.diag_15_17
    }

    /// Undecoded bytes 25..=26
    pub fn bytes_25_26(&self) -> &[u8] {
        &self.raw.diag_25_26
    }

    /// Undecoded byte 27
    pub fn byte_27(&self) -> &[u8] {
        &self.raw.diag_27
    }

    /// The message exactly as received.
    pub fn raw(&self) -> &[u8; STATUS_MESSAGE_LENGTH] {
        zerocopy::transmute_ref!(&self.raw)
    }

    /// The message viewed through its field layout.
    pub fn fields(&self) -> &StatusMessageRaw {
        &self.raw
    }
}

impl TryFrom<&[u8]> for PumpStatus {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        PumpStatus::decode(bytes)
    }
}

impl PartialEq for PumpStatus {
    fn eq(&self, other: &Self) -> bool {
        self.pump_date == other.pump_date && self.glucose_date == other.glucose_date
    }
}

impl fmt::Display for PumpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}), previous {}, battery {}%, reservoir {:.1} U, IOB {:.3} U, sensor {}h/{}h",
            self.pump_date.format("%Y-%m-%d %H:%M:%S"),
            self.glucose,
            self.glucose_trend,
            self.previous_glucose,
            self.battery_remaining_percent,
            self.reservoir_remaining,
            self.iob,
            self.sensor_age_hours,
            self.sensor_remaining_hours,
        )?;
        if let Some(next) = self.next_sensor_calibration {
            write!(f, ", next calibration {}", next.format("%Y-%m-%d %H:%M"))?;
        }
        Ok(())
    }
}
