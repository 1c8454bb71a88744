//! The timestamp value that every hour operation consumes and produces.
//!
//! A [`Timestamp`] is a set of proleptic Gregorian calendar fields plus a
//! [`DateTimeKind`] tag recording which frame of reference the caller claims
//! those fields are in. The tag is carried, never checked: nothing in this
//! crate compares it against a clock or a timezone database.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{HourError, Result};

/// The claimed frame of reference of a [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum DateTimeKind {
    /// No frame was declared.
    #[default]
    Unspecified,
    /// The calendar fields are UTC.
    Utc,
    /// The calendar fields are civil time in some timezone.
    Local,
}

impl fmt::Display for DateTimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateTimeKind::Unspecified => "Unspecified",
            DateTimeKind::Utc => "Utc",
            DateTimeKind::Local => "Local",
        };
        f.write_str(name)
    }
}

/// Calendar fields with a kind tag.
///
/// Equality and ordering compare the calendar fields first and the kind tag
/// second, so two timestamps with identical fields but different tags are
/// distinct values.
///
/// A leap second (chrono's nanosecond field at or above one second) is
/// folded into the last nanosecond of the preceding second on every
/// construction path, deserialization included, so `hh:mm:59.999999999` is
/// the latest instant of any minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "TimestampFields")]
pub struct Timestamp {
    naive: NaiveDateTime,
    kind: DateTimeKind,
}

/// Wire shape of [`Timestamp`]; deserialization goes through [`Timestamp::new`].
#[derive(Deserialize)]
struct TimestampFields {
    naive: NaiveDateTime,
    kind: DateTimeKind,
}

impl From<TimestampFields> for Timestamp {
    fn from(fields: TimestampFields) -> Self {
        Self::new(fields.naive, fields.kind)
    }
}

const LAST_NANO: u32 = 999_999_999;

impl Timestamp {
    /// Tag `naive` with `kind`, folding a leap second into `:59.999999999`.
    pub fn new(naive: NaiveDateTime, kind: DateTimeKind) -> Self {
        let naive = if naive.nanosecond() > LAST_NANO {
            naive.with_nanosecond(LAST_NANO).unwrap_or(naive)
        } else {
            naive
        };
        Self { naive, kind }
    }

    /// Tag `naive` as UTC.
    pub fn utc(naive: NaiveDateTime) -> Self {
        Self::new(naive, DateTimeKind::Utc)
    }

    /// Tag `naive` as civil time.
    pub fn local(naive: NaiveDateTime) -> Self {
        Self::new(naive, DateTimeKind::Local)
    }

    /// Build a timestamp from individual calendar fields.
    ///
    /// # Errors
    ///
    /// Returns [`HourError::InvalidDatetime`] if the fields do not name a real
    /// calendar instant (e.g. February 30th, hour 24) or if `nano` is not
    /// below one second. Leap-second representations are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use civil_hours::{DateTimeKind, Timestamp};
    ///
    /// let ts = Timestamp::from_ymd_hms_nano(2024, 5, 20, 14, 30, 0, 0, DateTimeKind::Utc)
    ///     .unwrap();
    /// assert_eq!(ts.to_string(), "2024-05-20T14:30:00Z");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms_nano(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
        kind: DateTimeKind,
    ) -> Result<Self> {
        if nano >= 1_000_000_000 {
            return Err(HourError::InvalidDatetime(format!(
                "nanosecond {nano} is not below one second"
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, second, nano))
            .map(|naive| Self::new(naive, kind))
            .ok_or_else(|| {
                HourError::InvalidDatetime(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{nano:09}"
                ))
            })
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    pub fn kind(&self) -> DateTimeKind {
        self.kind
    }

    /// Replace the calendar fields, keeping this timestamp's kind tag.
    pub(crate) fn with_naive(&self, naive: NaiveDateTime) -> Self {
        Self::new(naive, self.kind)
    }

    /// Interpret the calendar fields as a UTC instant.
    ///
    /// # Errors
    ///
    /// Returns [`HourError::NotUtc`] unless the kind tag is
    /// [`DateTimeKind::Utc`]. The fields are never reinterpreted.
    pub fn to_utc_datetime(&self) -> Result<DateTime<Utc>> {
        match self.kind {
            DateTimeKind::Utc => Ok(self.naive.and_utc()),
            found => Err(HourError::NotUtc { found }),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::utc(dt.naive_utc())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Self::new(naive, DateTimeKind::Unspecified)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.naive.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        if self.kind == DateTimeKind::Utc {
            f.write_str("Z")?;
        }
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
