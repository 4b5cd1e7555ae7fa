use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::calendar::Calendar;
use crate::constants::{PACKED_DATE_BASE_YEAR, PACKED_DATE_SIZE};

/// Six-byte timestamp as packed by the pump: time of day first, then date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct PackedDate {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub year_offset: u8, // years since 2000
    pub month: u8,
    pub day: u8,
}

const _: () = assert!(size_of::<PackedDate>() == PACKED_DATE_SIZE);

impl PackedDate {
    pub fn year(&self) -> i32 {
        PACKED_DATE_BASE_YEAR + i32::from(self.year_offset)
    }

    /// Wall-clock date and time, or `None` if any component is out of range.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year(), self.month.into(), self.day.into())?.and_hms_opt(
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
        )
    }

    /// Resolve the packed wall-clock time to an instant in `calendar`.
    pub fn resolve<C: Calendar + ?Sized>(&self, calendar: &C) -> Option<DateTime<FixedOffset>> {
        calendar.resolve(self.to_naive()?)
    }
}

impl From<[u8; PACKED_DATE_SIZE]> for PackedDate {
    fn from(bytes: [u8; PACKED_DATE_SIZE]) -> Self {
        zerocopy::transmute!(bytes)
    }
}
