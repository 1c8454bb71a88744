//! Timezone-aware 12-hour rendering.
//!
//! The pipeline is always `convert → (optionally truncate) → render`. The
//! conversion applies the zone's offset and DST rules at the instant being
//! converted; truncation then runs on the civil wall-clock fields. Reversing
//! the order gives wrong labels for zones whose offset is not a whole number
//! of hours at that instant (e.g. `Australia/Lord_Howe` outside DST, or
//! `Asia/Kolkata` all year).
//!
//! Display pattern: hour without leading zero, colon, two-digit minute,
//! `AM`/`PM` (`5:00AM`, `10:30PM`, `12:00PM`).

use chrono_tz::Tz;
use log::trace;

use crate::error::Result;
use crate::resolver::resolve_timezone;
use crate::timestamp::Timestamp;
use crate::truncate::start_of_hour;

const HOUR_PATTERN: &str = "%-I:%M%p";

/// Convert a UTC-tagged timestamp to civil time in `tz`.
///
/// The result carries the wall-clock fields observed in `tz` at that instant
/// and is tagged [`DateTimeKind::Local`](crate::DateTimeKind::Local).
///
/// # Errors
///
/// Returns [`HourError::NotUtc`](crate::HourError::NotUtc) if `utc` is not
/// tagged UTC. The fields are never reinterpreted under another frame.
pub fn to_civil(utc: Timestamp, tz: &Tz) -> Result<Timestamp> {
    let instant = utc.to_utc_datetime()?;
    let civil = instant.with_timezone(tz);
    trace!("converted {utc} to {} in {}", civil.naive_local(), tz.name());
    Ok(Timestamp::local(civil.naive_local()))
}

/// Render already-civil calendar fields as `h:mmAM`. No timezone logic.
///
/// # Examples
///
/// ```
/// use civil_hours::{render, DateTimeKind, Timestamp};
///
/// let ts = Timestamp::from_ymd_hms_nano(2024, 5, 20, 22, 0, 0, 0, DateTimeKind::Local).unwrap();
/// assert_eq!(render(ts), "10:00PM");
/// ```
pub fn render(local: Timestamp) -> String {
    local.naive().format(HOUR_PATTERN).to_string()
}

/// Render the civil time of a UTC instant in `tz`.
///
/// # Errors
///
/// Returns [`HourError::NotUtc`](crate::HourError::NotUtc) if `utc` is not
/// tagged UTC.
///
/// # Examples
///
/// ```
/// use civil_hours::{to_civil_hour_string, DateTimeKind, Timestamp};
///
/// let utc = Timestamp::from_ymd_hms_nano(2024, 5, 20, 14, 0, 0, 0, DateTimeKind::Utc).unwrap();
/// // May 20 2024 is EDT (UTC-4)
/// assert_eq!(to_civil_hour_string(utc, &chrono_tz::America::New_York).unwrap(), "10:00AM");
/// ```
pub fn to_civil_hour_string(utc: Timestamp, tz: &Tz) -> Result<String> {
    to_civil(utc, tz).map(render)
}

/// Render the start of the civil hour containing a UTC instant in `tz`.
///
/// # Errors
///
/// Returns [`HourError::NotUtc`](crate::HourError::NotUtc) if `utc` is not
/// tagged UTC.
pub fn to_civil_hour_string_truncated(utc: Timestamp, tz: &Tz) -> Result<String> {
    to_civil(utc, tz).map(|civil| render(start_of_hour(civil)))
}

/// [`to_civil_hour_string`] with the zone given by identifier.
///
/// # Errors
///
/// Returns [`HourError::InvalidTimezone`](crate::HourError::InvalidTimezone)
/// from [`resolve_timezone`], or the errors of [`to_civil_hour_string`].
pub fn to_civil_hour_string_by_id(utc: Timestamp, tz_id: &str) -> Result<String> {
    let tz = resolve_timezone(tz_id)?;
    to_civil_hour_string(utc, &tz)
}

/// [`to_civil_hour_string_truncated`] with the zone given by identifier.
///
/// # Errors
///
/// See [`to_civil_hour_string_by_id`].
pub fn to_civil_hour_string_truncated_by_id(utc: Timestamp, tz_id: &str) -> Result<String> {
    let tz = resolve_timezone(tz_id)?;
    to_civil_hour_string_truncated(utc, &tz)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HourError;
    use crate::timestamp::DateTimeKind;
    use chrono_tz::{America, Asia, Australia};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Timestamp {
        Timestamp::from_ymd_hms_nano(y, mo, d, h, mi, 0, 0, DateTimeKind::Utc).unwrap()
    }

    fn local(h: u32, mi: u32) -> Timestamp {
        Timestamp::from_ymd_hms_nano(2024, 5, 20, h, mi, 0, 0, DateTimeKind::Local).unwrap()
    }

    // ── render tests ────────────────────────────────────────────────────

    #[test]
    fn test_render_morning_and_evening() {
        assert_eq!(render(local(5, 0)), "5:00AM");
        assert_eq!(render(local(22, 7)), "10:07PM");
    }

    #[test]
    fn test_render_midnight_and_noon() {
        assert_eq!(render(local(0, 5)), "12:05AM");
        assert_eq!(render(local(12, 0)), "12:00PM");
    }

    #[test]
    fn test_render_ignores_kind() {
        let naive = local(15, 30).naive();
        assert_eq!(render(Timestamp::utc(naive)), "3:30PM");
        assert_eq!(render(Timestamp::from(naive)), "3:30PM");
    }

    // ── to_civil tests ──────────────────────────────────────────────────

    #[test]
    fn test_to_civil_tags_local() {
        let civil = to_civil(utc(2024, 5, 20, 14, 0), &America::New_York).unwrap();
        assert_eq!(civil.kind(), DateTimeKind::Local);
        assert_eq!(civil, local(10, 0));
    }

    #[test]
    fn test_to_civil_rejects_non_utc() {
        let err = to_civil(local(10, 0), &America::New_York).unwrap_err();
        assert_eq!(
            err,
            HourError::NotUtc {
                found: DateTimeKind::Local
            }
        );
    }

    #[test]
    fn test_to_civil_is_repeatable() {
        let input = utc(2024, 11, 3, 5, 30);
        let first = to_civil(input, &America::New_York).unwrap();
        let second = to_civil(input, &America::New_York).unwrap();
        assert_eq!(first, second);
        assert_eq!(input, utc(2024, 11, 3, 5, 30));
    }

    // ── Scenario tests (UTC 2024-05-20) ─────────────────────────────────

    #[test]
    fn test_eastern_afternoon() {
        let s =
            to_civil_hour_string_by_id(utc(2024, 5, 20, 14, 0), "Eastern Standard Time").unwrap();
        assert_eq!(s, "10:00AM");
    }

    #[test]
    fn test_eastern_morning() {
        let s =
            to_civil_hour_string_by_id(utc(2024, 5, 20, 9, 0), "Eastern Standard Time").unwrap();
        assert_eq!(s, "5:00AM");
    }

    #[test]
    fn test_pacific_midnight_is_previous_civil_day() {
        let input = utc(2024, 5, 20, 0, 0);
        let s = to_civil_hour_string_by_id(input, "Pacific Standard Time").unwrap();
        assert_eq!(s, "5:00PM");
        let civil = to_civil(input, &America::Los_Angeles).unwrap();
        assert_eq!(civil.to_string(), "2024-05-19T17:00:00");
    }

    #[test]
    fn test_pacific_late_evening() {
        let s =
            to_civil_hour_string_by_id(utc(2024, 5, 20, 23, 0), "Pacific Standard Time").unwrap();
        assert_eq!(s, "4:00PM");
    }

    // ── Truncation ordering ─────────────────────────────────────────────

    #[test]
    fn test_truncated_zeroes_minutes() {
        let s =
            to_civil_hour_string_truncated(utc(2024, 5, 20, 14, 42), &America::New_York).unwrap();
        assert_eq!(s, "10:00AM");
        let s = to_civil_hour_string(utc(2024, 5, 20, 14, 42), &America::New_York).unwrap();
        assert_eq!(s, "10:42AM");
    }

    #[test]
    fn test_truncates_after_converting_half_hour_zone() {
        // 14:45Z is 20:15 in Kolkata (+05:30); its civil hour starts at 8PM.
        let input = utc(2024, 5, 20, 14, 45);
        assert_eq!(to_civil_hour_string_truncated(input, &Asia::Kolkata).unwrap(), "8:00PM");

        // Truncating the UTC instant first would label it 7:30PM.
        let wrong_order = to_civil_hour_string(start_of_hour(input), &Asia::Kolkata).unwrap();
        assert_eq!(wrong_order, "7:30PM");
    }

    #[test]
    fn test_truncation_order_depends_on_dst() {
        // Lord Howe is +10:30 in July and +11:00 in January.
        let july = utc(2024, 7, 1, 3, 45);
        let converted_first = to_civil_hour_string_truncated(july, &Australia::Lord_Howe).unwrap();
        let truncated_first =
            to_civil_hour_string(start_of_hour(july), &Australia::Lord_Howe).unwrap();
        assert_eq!(converted_first, "2:00PM");
        assert_eq!(truncated_first, "1:30PM");

        let january = utc(2024, 1, 15, 3, 45);
        let converted_first =
            to_civil_hour_string_truncated(january, &Australia::Lord_Howe).unwrap();
        let truncated_first =
            to_civil_hour_string(start_of_hour(january), &Australia::Lord_Howe).unwrap();
        assert_eq!(converted_first, "2:00PM");
        assert_eq!(truncated_first, "2:00PM");
    }

    #[test]
    fn test_spring_forward_skips_civil_hour() {
        // 2024-03-10: New York jumps from 02:00 EST to 03:00 EDT at 07:00Z.
        let before = to_civil_hour_string(utc(2024, 3, 10, 6, 30), &America::New_York).unwrap();
        let after = to_civil_hour_string(utc(2024, 3, 10, 7, 0), &America::New_York).unwrap();
        assert_eq!(before, "1:30AM");
        assert_eq!(after, "3:00AM");
    }

    #[test]
    fn test_fall_back_repeats_civil_hour() {
        // 2024-11-03: New York falls back from 02:00 EDT to 01:00 EST at 06:00Z.
        let tz = America::New_York;
        let first = to_civil_hour_string_truncated(utc(2024, 11, 3, 5, 30), &tz).unwrap();
        let second = to_civil_hour_string_truncated(utc(2024, 11, 3, 6, 30), &tz).unwrap();
        assert_eq!(first, "1:00AM");
        assert_eq!(second, "1:00AM");
    }

    // ── Error propagation ───────────────────────────────────────────────

    #[test]
    fn test_non_utc_input_is_rejected() {
        let unspecified = Timestamp::from(utc(2024, 5, 20, 14, 0).naive());
        let err = to_civil_hour_string(unspecified, &America::New_York).unwrap_err();
        assert_eq!(
            err,
            HourError::NotUtc {
                found: DateTimeKind::Unspecified
            }
        );
        let err = to_civil_hour_string_truncated(local(10, 0), &America::New_York).unwrap_err();
        assert!(err.to_string().contains("Expected a UTC timestamp"), "got: {err}");
    }

    #[test]
    fn test_invalid_timezone_propagates() {
        let err = to_civil_hour_string_by_id(utc(2024, 5, 20, 14, 0), "Invalid/Zone").unwrap_err();
        assert!(matches!(err, HourError::InvalidTimezone(_)));
        let err =
            to_civil_hour_string_truncated_by_id(utc(2024, 5, 20, 14, 0), "Nowhere Standard Time")
                .unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_invalid_timezone_reported_before_kind() {
        let err = to_civil_hour_string_by_id(local(10, 0), "Invalid/Zone").unwrap_err();
        assert!(matches!(err, HourError::InvalidTimezone(_)));
    }
}
