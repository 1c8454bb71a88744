//! Calendar-unit truncation over embedded clock fields.
//!
//! Every function here works on the calendar fields a [`Timestamp`] carries
//! and nothing else. No timezone is consulted, and the kind tag of the input
//! is copied unchanged onto the output. A caller that wants civil-hour
//! boundaries converts to civil time first (see [`crate::format::to_civil`]).
//!
//! # Functions
//!
//! - [`start_of`] / [`end_of`] — bounds of the unit containing a timestamp
//! - [`start_of_next`] / [`start_of_previous`] — bounds of the adjacent units
//! - [`end_of_next`] / [`end_of_previous`] — inclusive ends of the adjacent units
//! - `*_hour` — the same operations fixed to [`TimeUnit::Hour`]
//!
//! # Inclusive ends
//!
//! An "end" is the last representable instant inside the unit, one tick
//! before the start of the following unit. Ranges built from [`start_of`] and
//! [`end_of`] are closed on both sides. The tick defaults to one nanosecond,
//! the finest resolution of [`chrono::NaiveDateTime`]; use [`end_of_with`]
//! to pick a coarser tick.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{HourError, Result};
use crate::timestamp::Timestamp;

// ── Granularity ─────────────────────────────────────────────────────────────

/// The calendar field a truncation keeps; everything finer is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Move `naive` by `n` whole units using calendar arithmetic.
    ///
    /// Sub-day units add exact multiples of their length. `Day` moves the
    /// date and keeps the clock fields. `Month` and `Year` move the month
    /// field and clamp the day to the length of the target month, so
    /// January 31st plus one month is the last day of February.
    ///
    /// # Errors
    ///
    /// Returns [`HourError::Overflow`] if the result falls outside the
    /// representable range.
    pub fn shift(self, naive: NaiveDateTime, n: i32) -> Result<NaiveDateTime> {
        let back = n < 0;
        let magnitude = n.unsigned_abs();
        let shifted = match self {
            TimeUnit::Second => naive.checked_add_signed(TimeDelta::seconds(i64::from(n))),
            TimeUnit::Minute => naive.checked_add_signed(TimeDelta::minutes(i64::from(n))),
            TimeUnit::Hour => naive.checked_add_signed(TimeDelta::hours(i64::from(n))),
            TimeUnit::Day if back => naive.checked_sub_days(Days::new(u64::from(magnitude))),
            TimeUnit::Day => naive.checked_add_days(Days::new(u64::from(magnitude))),
            TimeUnit::Month | TimeUnit::Year => {
                let months = if self == TimeUnit::Year {
                    magnitude.checked_mul(12)
                } else {
                    Some(magnitude)
                };
                months.and_then(|m| {
                    if back {
                        naive.checked_sub_months(Months::new(m))
                    } else {
                        naive.checked_add_months(Months::new(m))
                    }
                })
            }
        };
        shifted.ok_or_else(|| HourError::Overflow(format!("{naive} shifted by {n} {self}(s)")))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        };
        f.write_str(name)
    }
}

// ── Options ─────────────────────────────────────────────────────────────────

/// The tick subtracted from the next unit's start to form an inclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubsecondPrecision {
    /// Ends at `.999`.
    Millisecond,
    /// Ends at `.999999`.
    Microsecond,
    /// Ends at `.999999999`.
    #[default]
    Nanosecond,
}

impl SubsecondPrecision {
    pub fn tick(self) -> TimeDelta {
        match self {
            SubsecondPrecision::Millisecond => TimeDelta::milliseconds(1),
            SubsecondPrecision::Microsecond => TimeDelta::microseconds(1),
            SubsecondPrecision::Nanosecond => TimeDelta::nanoseconds(1),
        }
    }
}

/// Options for [`end_of_with`].
#[derive(Debug, Clone, Default)]
pub struct TruncateOptions {
    /// Resolution of the inclusive end.
    pub precision: SubsecondPrecision,
}

// ── Unit-generic operations ─────────────────────────────────────────────────

/// Reset every field finer than `unit`.
///
/// Clock fields become zero; for `Month` the day becomes 1, and for `Year`
/// both month and day become 1. This cannot fail: the truncated instant is
/// never later than the input and never earlier than the first day of the
/// input's year.
pub fn start_of(ts: Timestamp, unit: TimeUnit) -> Timestamp {
    let naive = ts.naive();
    let date = naive.date();
    let seconds = i64::from(naive.num_seconds_from_midnight());

    let truncated = match unit {
        TimeUnit::Second => midnight(date) + TimeDelta::seconds(seconds),
        TimeUnit::Minute => midnight(date) + TimeDelta::seconds(seconds - seconds % 60),
        TimeUnit::Hour => midnight(date) + TimeDelta::seconds(seconds - seconds % 3600),
        TimeUnit::Day => midnight(date),
        TimeUnit::Month => midnight(date - Days::new(u64::from(date.day0()))),
        TimeUnit::Year => midnight(date - Days::new(u64::from(date.ordinal0()))),
    };
    ts.with_naive(truncated)
}

/// Start of the unit after the one containing `ts`.
///
/// # Errors
///
/// Returns [`HourError::Overflow`] past the last representable unit.
pub fn start_of_next(ts: Timestamp, unit: TimeUnit) -> Result<Timestamp> {
    let start = start_of(ts, unit);
    Ok(start.with_naive(unit.shift(start.naive(), 1)?))
}

/// Start of the unit before the one containing `ts`.
///
/// # Errors
///
/// Returns [`HourError::Overflow`] before the first representable unit.
pub fn start_of_previous(ts: Timestamp, unit: TimeUnit) -> Result<Timestamp> {
    let start = start_of(ts, unit);
    Ok(start.with_naive(unit.shift(start.naive(), -1)?))
}

/// Inclusive end of the unit containing `ts`, at nanosecond precision.
///
/// # Errors
///
/// Returns [`HourError::Overflow`] when `ts` lies in the last representable
/// unit, because the end is defined relative to the next unit's start.
pub fn end_of(ts: Timestamp, unit: TimeUnit) -> Result<Timestamp> {
    end_of_with(ts, unit, &TruncateOptions::default())
}

/// Inclusive end of the unit containing `ts`, one `options.precision` tick
/// before [`start_of_next`].
///
/// # Errors
///
/// See [`end_of`].
pub fn end_of_with(ts: Timestamp, unit: TimeUnit, options: &TruncateOptions) -> Result<Timestamp> {
    let next = start_of_next(ts, unit)?;
    let tick = options.precision.tick();
    next.naive()
        .checked_sub_signed(tick)
        .map(|naive| ts.with_naive(naive))
        .ok_or_else(|| HourError::Overflow(format!("{next} minus one tick")))
}

/// Inclusive end of the unit after the one containing `ts`.
///
/// # Errors
///
/// Returns [`HourError::Overflow`] if either the next unit or its end leaves
/// the representable range.
pub fn end_of_next(ts: Timestamp, unit: TimeUnit) -> Result<Timestamp> {
    end_of(start_of_next(ts, unit)?, unit)
}

/// Inclusive end of the unit before the one containing `ts`.
///
/// # Errors
///
/// Returns [`HourError::Overflow`] before the first representable unit.
pub fn end_of_previous(ts: Timestamp, unit: TimeUnit) -> Result<Timestamp> {
    end_of(start_of_previous(ts, unit)?, unit)
}

// ── Hour operations ─────────────────────────────────────────────────────────

/// `ts` with minute, second and sub-second fields set to zero.
///
/// # Examples
///
/// ```
/// use civil_hours::{start_of_hour, DateTimeKind, Timestamp};
///
/// let ts = Timestamp::from_ymd_hms_nano(2023, 8, 15, 3, 27, 12, 5, DateTimeKind::Local).unwrap();
/// let start = start_of_hour(ts);
/// assert_eq!(start.to_string(), "2023-08-15T03:00:00");
/// assert_eq!(start.kind(), DateTimeKind::Local);
/// ```
pub fn start_of_hour(ts: Timestamp) -> Timestamp {
    start_of(ts, TimeUnit::Hour)
}

/// [`start_of_hour`] advanced by one calendar hour.
pub fn start_of_next_hour(ts: Timestamp) -> Result<Timestamp> {
    start_of_next(ts, TimeUnit::Hour)
}

/// [`start_of_hour`] moved back by one calendar hour. Hour 0 rolls back into
/// hour 23 of the previous day.
pub fn start_of_previous_hour(ts: Timestamp) -> Result<Timestamp> {
    start_of_previous(ts, TimeUnit::Hour)
}

/// Last nanosecond of the hour containing `ts` (`hh:59:59.999999999`).
///
/// # Examples
///
/// ```
/// use civil_hours::{end_of_hour, DateTimeKind, Timestamp};
///
/// let ts = Timestamp::from_ymd_hms_nano(2023, 8, 15, 3, 27, 0, 0, DateTimeKind::Unspecified)
///     .unwrap();
/// assert_eq!(end_of_hour(ts).unwrap().to_string(), "2023-08-15T03:59:59.999999999");
/// ```
pub fn end_of_hour(ts: Timestamp) -> Result<Timestamp> {
    end_of(ts, TimeUnit::Hour)
}

/// Last nanosecond of the hour following the one containing `ts`.
pub fn end_of_next_hour(ts: Timestamp) -> Result<Timestamp> {
    end_of_next(ts, TimeUnit::Hour)
}

/// Last nanosecond of the hour preceding the one containing `ts`.
pub fn end_of_previous_hour(ts: Timestamp) -> Result<Timestamp> {
    end_of_previous(ts, TimeUnit::Hour)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

// ── Tests ───────────────────────────────────────────────────────────────────
