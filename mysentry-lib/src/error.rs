use thiserror::Error;

/// Reasons a status message fails to decode.
///
/// Decoding is all-or-nothing: any of these means no [`crate::PumpStatus`]
/// was produced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Malformed length: expected {expected} bytes, got {actual}")]
    MalformedLength { expected: usize, actual: usize },

    #[error("Malformed glucose trend bits: {0:#06b}")]
    MalformedTrend(u8),

    #[error("Pump date does not form a valid calendar date")]
    MalformedPumpDate,
}
