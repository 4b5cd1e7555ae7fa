use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::Display;

use crate::constants::TREND_MASK;
use crate::error::DecodeError;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Short-term direction of glucose change reported by the sensor.
///
/// Discriminants are the masked trend bits of the trend/status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[repr(u8)]
pub enum GlucoseTrend {
    Flat = 0b0000,
    Up = 0b0010,
    UpUp = 0b0100,
    Down = 0b0110,
    DownDown = 0b1000,
}

impl GlucoseTrend {
    /// Decode the trend from bits 1..=3 of the trend/status byte.
    ///
    /// The remaining bits are ignored. Patterns `0b1010`, `0b1100` and
    /// `0b1110` have no meaning and fail with [`DecodeError::MalformedTrend`].
    pub fn from_status_byte(byte: u8) -> Result<Self, DecodeError> {
        let bits = byte & TREND_MASK;
        Self::try_from(bits).map_err(|_| DecodeError::MalformedTrend(bits))
    }
}
