//! Schedule records as held by the remote store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::date::ScheduleDate;
use crate::error::{RosterError, RosterResult};

pub type ScheduleId = i64;

fn default_active() -> bool {
    true
}

/// One assignment of a person to an event on a date.
///
/// Owned by the store; roster only ever holds read-only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub schedule_id: ScheduleId,
    pub name: String,
    pub event_name: String,
    pub schedule_date: ScheduleDate,

    // Provenance, set by the store
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// The writable part of a record, sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFields {
    pub name: String,
    pub event_name: String,
    pub schedule_date: ScheduleDate,
}

impl ScheduleRecord {
    /// Decode a row as the store returns it, reading a timestamp-typed
    /// `schedule_date` as its civil date in `tz`.
    pub fn from_row(mut row: serde_json::Value, tz: Tz) -> RosterResult<Self> {
        let localized = match row.get("schedule_date") {
            Some(serde_json::Value::String(raw)) => Some(ScheduleDate::parse_in(raw, tz)?),
            _ => None,
        };
        if let Some(date) = localized {
            row["schedule_date"] = serde_json::Value::String(date.to_string());
        }
        Ok(serde_json::from_value(row)?)
    }

    pub fn fields(&self) -> ScheduleFields {
        ScheduleFields {
            name: self.name.clone(),
            event_name: self.event_name.clone(),
            schedule_date: self.schedule_date,
        }
    }
}

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleColumn {
    Id,
    Event,
    Assigned,
    Date,
}

impl ScheduleColumn {
    pub const ALL: [ScheduleColumn; 4] = [
        ScheduleColumn::Id,
        ScheduleColumn::Event,
        ScheduleColumn::Assigned,
        ScheduleColumn::Date,
    ];

    /// Header label shown in the table.
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleColumn::Id => "ID",
            ScheduleColumn::Event => "Event",
            ScheduleColumn::Assigned => "Assigned",
            ScheduleColumn::Date => "Schedule Date",
        }
    }

    /// Natural ordering of two records on this column: numeric for the id,
    /// lexicographic for text, chronological for the date.
    pub fn compare(&self, a: &ScheduleRecord, b: &ScheduleRecord) -> Ordering {
        match self {
            ScheduleColumn::Id => a.schedule_id.cmp(&b.schedule_id),
            ScheduleColumn::Event => a.event_name.cmp(&b.event_name),
            ScheduleColumn::Assigned => a.name.cmp(&b.name),
            ScheduleColumn::Date => a.schedule_date.cmp(&b.schedule_date),
        }
    }
}

impl fmt::Display for ScheduleColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduleColumn {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" | "schedule_id" => Ok(ScheduleColumn::Id),
            "event" | "event_name" => Ok(ScheduleColumn::Event),
            "assigned" | "name" => Ok(ScheduleColumn::Assigned),
            "date" | "schedule_date" => Ok(ScheduleColumn::Date),
            _ => Err(RosterError::UnknownColumn(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_minimal_row() {
        let json = r#"{"schedule_id":1,"name":"John","event_name":"GLC","schedule_date":"2025-08-03"}"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.schedule_id, 1);
        assert_eq!(record.schedule_date, ScheduleDate::from_ymd(2025, 8, 3).unwrap());
        assert!(record.is_active);
        assert_eq!(record.created_by, None);
    }

    #[test]
    fn deserializes_full_row() {
        let json = r#"{
            "schedule_id": 7,
            "name": "Amy",
            "event_name": "SUNDAY",
            "schedule_date": "2025-08-10",
            "created_by": "admin",
            "created_at": "2025-08-01T02:15:00+00:00",
            "updated_by": null,
            "updated_at": null,
            "is_active": false
        }"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.created_by.as_deref(), Some("admin"));
        assert!(record.created_at.is_some());
        assert!(!record.is_active);
    }

    #[test]
    fn timestamp_rows_use_civil_date_in_display_timezone() {
        let row = serde_json::json!({
            "schedule_id": 3,
            "name": "Irene",
            "event_name": "B1G",
            "schedule_date": "2025-08-02T16:00:00Z",
        });

        let manila = ScheduleRecord::from_row(row.clone(), chrono_tz::Asia::Manila).unwrap();
        assert_eq!(manila.schedule_date, ScheduleDate::from_ymd(2025, 8, 3).unwrap());

        let utc = ScheduleRecord::from_row(row, chrono_tz::UTC).unwrap();
        assert_eq!(utc.schedule_date, ScheduleDate::from_ymd(2025, 8, 2).unwrap());
    }

    #[test]
    fn from_row_rejects_bad_dates() {
        let row = serde_json::json!({
            "schedule_id": 3,
            "name": "Irene",
            "event_name": "B1G",
            "schedule_date": "next sunday",
        });
        assert!(matches!(
            ScheduleRecord::from_row(row, chrono_tz::UTC),
            Err(RosterError::InvalidDate(_))
        ));
    }

    #[test]
    fn column_names_parse() {
        assert_eq!("name".parse::<ScheduleColumn>().unwrap(), ScheduleColumn::Assigned);
        assert_eq!("ID".parse::<ScheduleColumn>().unwrap(), ScheduleColumn::Id);
        assert!("colour".parse::<ScheduleColumn>().is_err());
    }
}
