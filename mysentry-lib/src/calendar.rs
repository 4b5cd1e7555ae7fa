//! Calendar capability used to turn packed wall-clock times into instants.

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use tracing::debug;

use crate::constants::{CALIBRATION_MINUTE, CALIBRATION_SEARCH_DAYS};

/// Interprets wall-clock date/time components in some time zone.
///
/// Every [`chrono::TimeZone`] is a calendar, so `&Utc`, `&Local` or a
/// `FixedOffset` can be passed wherever a calendar is expected.
pub trait Calendar {
    /// Instant at which the wall clock reads `local`.
    ///
    /// Ambiguous times resolve to the earliest instant; times skipped by a
    /// forward transition resolve to `None`.
    fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<FixedOffset>>;

    /// Every instant at which the wall clock reads `local`, earliest first.
    ///
    /// Two instants for a time repeated by a backward transition, none for
    /// a skipped time.
    fn candidates(&self, local: NaiveDateTime) -> Vec<DateTime<FixedOffset>> {
        self.resolve(local).into_iter().collect()
    }

    /// Wall-clock reading of `instant` in this calendar.
    fn wall_clock(&self, instant: &DateTime<FixedOffset>) -> NaiveDateTime;

    /// Earliest instant strictly after `after` whose wall clock reads
    /// `hour:minute:second`.
    ///
    /// Returns `None` for out-of-range components, or when no such instant
    /// exists within the next few days.
    fn next_matching(
        &self,
        after: &DateTime<FixedOffset>,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<DateTime<FixedOffset>> {
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        self.wall_clock(after)
            .date()
            .iter_days()
            .take(CALIBRATION_SEARCH_DAYS)
            .find_map(|day| {
                self.candidates(day.and_time(time))
                    .into_iter()
                    .find(|candidate| candidate > after)
            })
    }
}

impl<Tz: TimeZone> Calendar for Tz {
    fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        self.from_local_datetime(&local).earliest().map(|dt| dt.fixed_offset())
    }

    fn candidates(&self, local: NaiveDateTime) -> Vec<DateTime<FixedOffset>> {
        match self.from_local_datetime(&local) {
            LocalResult::Single(dt) => vec![dt.fixed_offset()],
            LocalResult::Ambiguous(first, second) => vec![first.fixed_offset(), second.fixed_offset()],
            LocalResult::None => Vec::new(),
        }
    }

    fn wall_clock(&self, instant: &DateTime<FixedOffset>) -> NaiveDateTime {
        instant.with_timezone(self).naive_local()
    }
}

/// Next scheduled sensor calibration after `pump_date`.
///
/// Calibrations fall at minute 13 of the hour carried in the message, so
/// the result is the first `hour:13:00` strictly after `pump_date`.
pub fn next_calibration<C: Calendar + ?Sized>(
    calendar: &C,
    pump_date: &DateTime<FixedOffset>,
    hour: u8,
) -> Option<DateTime<FixedOffset>> {
    let next = calendar.next_matching(pump_date, hour.into(), CALIBRATION_MINUTE, 0);
    if next.is_none() {
        debug!(hour, %pump_date, "No next calibration instant");
    }
    next
}
