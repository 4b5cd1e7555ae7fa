//! Key/value export of a decoded status message.

use chrono::{DateTime, FixedOffset};
use mysentry_lib::{GlucoseTrend, PumpStatus};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub glucose_trend: GlucoseTrend,
    pub pump_date: String,
    pub reservoir_remaining: f64,
    pub iob: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose_date: Option<String>,
    pub sensor_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_glucose: Option<u16>,
    pub last_sensor_status: String,
    pub sensor_age_hours: u8,
    pub sensor_remaining_hours: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_sensor_calibration: Option<String>,
    pub battery_remaining_percent: u16,
    /// Same byte as `byte11`; kept for consumers of the older key
    #[serde(rename = "byte1")]
    pub byte_1: String,
    #[serde(rename = "byte11")]
    pub byte_11: String,
    #[serde(rename = "byte1517")]
    pub bytes_15_17: String,
    #[serde(rename = "byte2526")]
    pub bytes_25_26: String,
    #[serde(rename = "byte27")]
    pub byte_27: String,
}

fn format_date(date: DateTime<FixedOffset>) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl From<&PumpStatus> for StatusReport {
    fn from(status: &PumpStatus) -> Self {
        StatusReport {
            glucose_trend: status.glucose_trend(),
            pump_date: format_date(status.pump_date()),
            reservoir_remaining: status.reservoir_remaining(),
            iob: status.iob(),
            glucose: status.glucose().glucose(),
            glucose_date: status.glucose_date().map(format_date),
            sensor_status: status.glucose().to_string(),
            last_glucose: status.previous_glucose().glucose(),
            last_sensor_status: status.previous_glucose().to_string(),
            sensor_age_hours: status.sensor_age_hours(),
            sensor_remaining_hours: status.sensor_remaining_hours(),
            next_sensor_calibration: status.next_sensor_calibration().map(format_date),
            battery_remaining_percent: status.battery_remaining_percent(),
            byte_1: hex::encode(status.byte_11()),
            byte_11: hex::encode(status.byte_11()),
            bytes_15_17: hex::encode(status.bytes_15_17()),
            bytes_25_26: hex::encode(status.bytes_25_26()),
            byte_27: hex::encode(status.byte_27()),
        }
    }
}
