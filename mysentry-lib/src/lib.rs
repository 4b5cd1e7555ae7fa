//! Decoder for the 36-byte MySentry status message that an insulin pump
//! periodically broadcasts to paired monitoring receivers.
//!
//! The entry point is [`PumpStatus::decode`] (local calendar) or
//! [`PumpStatus::decode_with`] for an injected [`Calendar`].

pub mod calendar;
pub mod constants;
pub mod date;
pub mod error;
pub mod field;
pub mod reading;
pub mod status;
pub mod trend;

pub use calendar::Calendar;
pub use error::DecodeError;
pub use reading::SensorReading;
pub use status::PumpStatus;
pub use trend::GlucoseTrend;
