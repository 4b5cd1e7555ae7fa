use std::fmt;

use crate::constants::SENTINEL_MAX;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Sensor glucose reading: either a device condition or a concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SensorReading {
    Off,
    MeterBGNow,
    WeakSignal,
    CalError,
    Warmup,
    Ended,
    /// Above 400 mg/dL
    HighBG,
    Lost,
    /// Reserved code with no known meaning
    Unknown,
    /// Measured glucose in mg/dL
    Active { glucose: u16 },
}

impl SensorReading {
    /// Glucose concentration in mg/dL, if the reading is active.
    pub fn glucose(&self) -> Option<u16> {
        match *self {
            SensorReading::Active { glucose } => Some(glucose),
            _ => None,
        }
    }
}

impl From<u16> for SensorReading {
    fn from(value: u16) -> Self {
        match value {
            0 => SensorReading::Off,
            2 => SensorReading::MeterBGNow,
            4 => SensorReading::WeakSignal,
            6 => SensorReading::CalError,
            8 => SensorReading::Warmup,
            10 => SensorReading::Ended,
            14 => SensorReading::HighBG,
            20 => SensorReading::Lost,
            0..=SENTINEL_MAX => SensorReading::Unknown,
            glucose => SensorReading::Active { glucose },
        }
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorReading::Off => f.write_str("Off"),
            SensorReading::MeterBGNow => f.write_str("MeterBGNow"),
            SensorReading::WeakSignal => f.write_str("WeakSignal"),
            SensorReading::CalError => f.write_str("CalError"),
            SensorReading::Warmup => f.write_str("Warmup"),
            SensorReading::Ended => f.write_str("Ended"),
            SensorReading::HighBG => f.write_str("HighBG"),
            SensorReading::Lost => f.write_str("Lost"),
            SensorReading::Unknown => f.write_str("Unknown"),
            SensorReading::Active { glucose } => write!(f, "Active(glucose: {})", glucose),
        }
    }
}
