//! Civil dates for schedules and the single formatter used by every surface.
//!
//! A schedule happens on a calendar day, not at an instant, so
//! [`ScheduleDate`] carries no time-of-day and no offset. Instants (record
//! provenance timestamps, "now") are converted into the display timezone
//! before they become civil dates, which keeps the calendar and the table
//! from drifting a day apart.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};

/// Display timezone when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Manila;

const WIRE_FORMAT: &str = "%Y-%m-%d";

// Postgres `timestamptz` output uses a space and may drop offset minutes
const OFFSET_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The day a person is scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleDate(NaiveDate);

impl ScheduleDate {
    pub fn new(date: NaiveDate) -> Self {
        ScheduleDate(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(ScheduleDate)
    }

    /// The civil date of `instant` as seen in `tz`.
    pub fn from_instant(instant: DateTime<Utc>, tz: Tz) -> Self {
        ScheduleDate(instant.with_timezone(&tz).date_naive())
    }

    /// Parse a stored value in the default display timezone. See
    /// [`ScheduleDate::parse_in`].
    pub fn parse(s: &str) -> RosterResult<Self> {
        ScheduleDate::parse_in(s, DEFAULT_TIMEZONE)
    }

    /// Parse a stored value: `YYYY-MM-DD`, a timestamp with an offset (the
    /// instant's civil date in `tz`), or a timestamp without one (its own
    /// date).
    pub fn parse_in(s: &str, tz: Tz) -> RosterResult<Self> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, WIRE_FORMAT) {
            return Ok(ScheduleDate(date));
        }

        let with_offset = DateTime::parse_from_rfc3339(s).ok().or_else(|| {
            OFFSET_TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        });
        if let Some(instant) = with_offset {
            return Ok(ScheduleDate::from_instant(instant.with_timezone(&Utc), tz));
        }

        NAIVE_TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|ts| ScheduleDate(ts.date()))
            .ok_or_else(|| RosterError::InvalidDate(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ScheduleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl Serialize for ScheduleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ScheduleDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Where a date is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSurface {
    /// Day headings in the calendar agenda (`Sun Aug 3`).
    Calendar,
    /// Ends of a calendar week range (`Aug 3, 2025`).
    CalendarWeek,
    /// Calendar month heading (`August 2025`).
    CalendarMonth,
    /// Calendar year heading (`2025`).
    CalendarYear,
    /// The schedule table (configured numeric format, `08/03/2025` by default).
    Table,
    /// The read-only detail view and the calendar day heading (`August 3, 2025`).
    Detail,
}

/// Formats dates and timestamps for display in the configured timezone.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    tz: Tz,
    table_format: String,
    timestamp_format: String,
}

impl DateFormatter {
    pub fn new(tz: Tz, table_format: impl Into<String>, timestamp_format: impl Into<String>) -> Self {
        DateFormatter {
            tz,
            table_format: table_format.into(),
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn from_config(config: &RosterConfig) -> Self {
        DateFormatter::new(
            config.timezone,
            config.table_date_format.clone(),
            config.timestamp_format.clone(),
        )
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn date(&self, date: ScheduleDate, surface: DateSurface) -> String {
        let pattern = match surface {
            DateSurface::Calendar => "%a %b %-d",
            DateSurface::CalendarWeek => "%b %-d, %Y",
            DateSurface::CalendarMonth => "%B %Y",
            DateSurface::CalendarYear => "%Y",
            DateSurface::Table => self.table_format.as_str(),
            DateSurface::Detail => "%B %-d, %Y",
        };
        date.date().format(pattern).to_string()
    }

    /// Format a provenance timestamp; a missing value renders empty.
    pub fn timestamp(&self, instant: Option<DateTime<Utc>>) -> String {
        instant
            .map(|ts| ts.with_timezone(&self.tz).format(&self.timestamp_format).to_string())
            .unwrap_or_default()
    }

    pub fn today(&self) -> ScheduleDate {
        ScheduleDate::from_instant(Utc::now(), self.tz)
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        DateFormatter::from_config(&RosterConfig::default())
    }
}
