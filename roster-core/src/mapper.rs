//! Turns fetched records into what the calendar and the table display.

use crate::date::{DateFormatter, DateSurface, ScheduleDate};
use crate::record::{ScheduleId, ScheduleRecord};

/// A single-day calendar entry derived from a record.
///
/// Rebuilt on every refresh; it has no identity beyond its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub start: ScheduleDate,
    pub end: ScheduleDate,
    pub title: String,
}

impl From<&ScheduleRecord> for CalendarEvent {
    fn from(record: &ScheduleRecord) -> Self {
        CalendarEvent {
            id: record.schedule_id.to_string(),
            start: record.schedule_date,
            end: record.schedule_date,
            title: record.name.clone(),
        }
    }
}

pub fn to_calendar_events(records: &[ScheduleRecord]) -> Vec<CalendarEvent> {
    records.iter().map(CalendarEvent::from).collect()
}

/// One rendered line of the schedule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub schedule_id: ScheduleId,
    pub event_name: String,
    pub name: String,
    pub schedule_date: String,
}

pub fn to_table_rows(records: &[ScheduleRecord], formatter: &DateFormatter) -> Vec<TableRow> {
    records
        .iter()
        .map(|r| TableRow {
            schedule_id: r.schedule_id,
            event_name: r.event_name.clone(),
            name: r.name.clone(),
            schedule_date: formatter.date(r.schedule_date, DateSurface::Table),
        })
        .collect()
}
