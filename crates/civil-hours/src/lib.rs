//! # civil-hours
//!
//! Deterministic calendar-hour arithmetic and 12-hour display formatting.
//!
//! Hour boundaries are computed from a timestamp's own calendar fields with
//! no ambient timezone state. Timezone conversion is explicit: the formatter
//! takes a UTC-tagged timestamp and a resolved zone, converts to civil time,
//! and only then truncates and renders.
//!
//! ## Modules
//!
//! - [`timestamp`] — calendar fields plus a UTC/Local/Unspecified kind tag
//! - [`truncate`] — start/end of the current, next and previous hour (or any [`TimeUnit`])
//! - [`format`] — UTC → civil conversion and `h:mmAM` rendering
//! - [`resolver`] — IANA and Windows timezone identifier resolution
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use civil_hours::{end_of_hour, to_civil_hour_string_by_id, DateTimeKind, Timestamp};
//!
//! let utc = Timestamp::from_ymd_hms_nano(2024, 5, 20, 14, 0, 0, 0, DateTimeKind::Utc).unwrap();
//! assert_eq!(to_civil_hour_string_by_id(utc, "Eastern Standard Time").unwrap(), "10:00AM");
//! assert_eq!(end_of_hour(utc).unwrap().to_string(), "2024-05-20T14:59:59.999999999Z");
//! ```

pub mod error;
pub mod format;
pub mod resolver;
pub mod timestamp;
pub mod truncate;

pub use error::{HourError, Result};
pub use format::{
    render, to_civil, to_civil_hour_string, to_civil_hour_string_by_id,
    to_civil_hour_string_truncated, to_civil_hour_string_truncated_by_id,
};
pub use resolver::{resolve_timezone, windows_to_iana};
pub use timestamp::{DateTimeKind, Timestamp};
pub use truncate::{
    end_of, end_of_hour, end_of_next, end_of_next_hour, end_of_previous, end_of_previous_hour,
    end_of_with, start_of, start_of_hour, start_of_next, start_of_next_hour, start_of_previous,
    start_of_previous_hour, SubsecondPrecision, TimeUnit, TruncateOptions,
};
