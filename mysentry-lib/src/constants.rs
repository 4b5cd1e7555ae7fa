// Layout constants for the MySentry pump status message

/// Length of a status message body (36 bytes)
pub const STATUS_MESSAGE_LENGTH: usize = 36;

/// Length of a packed date field (hour, minute, second, year, month, day)
pub const PACKED_DATE_SIZE: usize = 6;

/// Years in a packed date are stored as an offset from 2000
pub const PACKED_DATE_BASE_YEAR: i32 = 2000;

/// Mask selecting the trend bits (1..=3) of the trend/status byte
pub const TREND_MASK: u8 = 0b1110;

/// Reservoir volume resolution (0.1 U per count)
pub const RESERVOIR_SCALE: f64 = 0.1;

/// Insulin-on-board resolution (0.025 U per count)
pub const IOB_SCALE: f64 = 0.025;

/// Battery raw value that reads as 100 percent
pub const BATTERY_FULL_RAW: f64 = 4.0;

/// Left shift applied to the overflow byte for the current glucose bit (bit 0)
pub const GLUCOSE_OVERFLOW_SHIFT: u32 = 7;

/// Left shift applied to the overflow byte for the previous glucose bit (bit 1)
pub const PREVIOUS_GLUCOSE_OVERFLOW_SHIFT: u32 = 6;

/// Highest sensor code reserved for sentinel states
pub const SENTINEL_MAX: u16 = 20;

/// Minute of the hour at which calibrations are scheduled
pub const CALIBRATION_MINUTE: u32 = 13;

/// Days searched forward for the next calibration instant
pub const CALIBRATION_SEARCH_DAYS: usize = 3;
