//! Terminal rendering for roster screens.
//!
//! Plain-text layouts with owo_colors highlighting: the schedule table, the
//! calendar range, the detail view and form feedback.

use owo_colors::OwoColorize;
use roster_core::calendar::CalendarCursor;
use roster_core::date::{DateFormatter, DateSurface};
use roster_core::filter::FilterCriteria;
use roster_core::forms::FieldErrors;
use roster_core::mapper::{CalendarEvent, TableRow};
use roster_core::sort::SortState;
use roster_core::{ScheduleColumn, ScheduleRecord};

const CAPTION: &str = "A list of assigned people per event";

/// Header label with the sort arrow on the active column.
fn header(column: ScheduleColumn, sort: &SortState) -> String {
    match sort.indicator(column) {
        Some(arrow) => format!("{} {}", column.label(), arrow),
        None => column.label().to_string(),
    }
}

fn cells(row: &TableRow) -> [String; 4] {
    [
        row.schedule_id.to_string(),
        row.event_name.clone(),
        row.name.clone(),
        row.schedule_date.clone(),
    ]
}

pub fn table(rows: &[TableRow], sort: &SortState, criteria: &FilterCriteria) -> String {
    let headers: Vec<String> = ScheduleColumn::ALL.iter().map(|c| header(*c, sort)).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let pad = |text: &str, width: usize| format!("{text:<width$}");

    let mut lines = Vec::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    lines.push(header_line.join("  ").bold().to_string());

    if rows.is_empty() {
        lines.push("No schedules found".dimmed().to_string());
    }

    for row in rows {
        let line: Vec<String> = cells(row)
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad(c, *w))
            .collect();
        lines.push(line.join("  "));
    }

    lines.push(String::new());
    lines.push(CAPTION.dimmed().to_string());
    if let Some(summary) = filter_summary(criteria) {
        lines.push(summary.dimmed().to_string());
    }

    lines.join("\n")
}

fn filter_summary(criteria: &FilterCriteria) -> Option<String> {
    if criteria.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    if !criteria.assigned_name.is_empty() {
        parts.push(format!("assigned: {}", criteria.assigned_name));
    }
    if !criteria.event_name.is_empty() {
        parts.push(format!("event: {}", criteria.event_name));
    }
    if criteria.show_all {
        parts.push("including inactive".to_string());
    }
    Some(format!("Filtered by {}", parts.join(", ")))
}

/// Events in the cursor's range, grouped by day.
pub fn calendar(cursor: &CalendarCursor, events: &[CalendarEvent], formatter: &DateFormatter) -> String {
    let mut lines = vec![cursor.title(formatter).bold().to_string()];
    let visible = cursor.visible(events);

    if visible.is_empty() {
        lines.push("No schedules in this range".dimmed().to_string());
        return lines.join("\n");
    }

    let today = formatter.today();
    let mut current_day = None;

    for event in visible {
        if current_day != Some(event.start) {
            lines.push(String::new());
            let label = formatter.date(event.start, DateSurface::Calendar);
            if event.start == today {
                lines.push(format!("{} {}", label.bold(), "(today)".green()));
            } else {
                lines.push(label.bold().to_string());
            }
            current_day = Some(event.start);
        }

        let tag = format!("[#{}]", event.id);
        lines.push(format!("  {} {}", event.title, tag.dimmed()));
    }

    lines.join("\n")
}

pub fn details(details: &[(&'static str, String)]) -> String {
    let width = details.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    details
        .iter()
        .map(|(label, value)| format!("{:<width$}  {}", label.bold(), value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {} {}", field.label().red(), message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Changed fields between two versions of a record.
pub fn field_changes(old: &ScheduleRecord, new: &ScheduleRecord, formatter: &DateFormatter) -> Vec<String> {
    let mut lines = Vec::new();

    if old.name != new.name {
        lines.push(format!("{}: {} → {}", "assigned".dimmed(), old.name.red(), new.name.green()));
    }
    if old.event_name != new.event_name {
        lines.push(format!(
            "{}: {} → {}",
            "event".dimmed(),
            old.event_name.red(),
            new.event_name.green()
        ));
    }
    if old.schedule_date != new.schedule_date {
        let old_date = formatter.date(old.schedule_date, DateSurface::Table);
        let new_date = formatter.date(new.schedule_date, DateSurface::Table);
        lines.push(format!("{}: {} → {}", "date".dimmed(), old_date.red(), new_date.green()));
    }

    if lines.is_empty() {
        lines.push("No changes".dimmed().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::calendar::CalendarView;
    use roster_core::date::ScheduleDate;

    fn row(id: i64, event: &str, name: &str, date: &str) -> TableRow {
        TableRow {
            schedule_id: id,
            event_name: event.to_string(),
            name: name.to_string(),
            schedule_date: date.to_string(),
        }
    }

    #[test]
    fn table_marks_active_sort_column() {
        let mut sort = SortState::default();
        sort.toggle(ScheduleColumn::Assigned);

        let out = table(
            &[row(1, "GLC", "John", "08/03/2025")],
            &sort,
            &FilterCriteria::default(),
        );

        assert!(out.contains("Assigned ↑"));
        assert!(out.contains("John"));
        assert!(!out.contains("Filtered by"));
    }

    #[test]
    fn empty_table_says_so() {
        let out = table(&[], &SortState::default(), &FilterCriteria::new("John", ""));
        assert!(out.contains("No schedules found"));
        assert!(out.contains("Filtered by assigned: John"));
    }

    #[test]
    fn calendar_headings_use_calendar_surfaces() {
        let day = ScheduleDate::parse("2025-08-03").unwrap();
        let events = [CalendarEvent {
            id: "1".to_string(),
            start: day,
            end: day,
            title: "John".to_string(),
        }];
        let cursor = CalendarCursor::new(CalendarView::Month, day);

        let out = calendar(&cursor, &events, &DateFormatter::default());
        assert!(out.contains("August 2025"));
        assert!(out.contains("Sun Aug 3"));
        assert!(out.contains("John"));
    }

    #[test]
    fn filter_summary_lists_constraints() {
        let criteria = FilterCriteria {
            assigned_name: "Amy".into(),
            event_name: "GLC".into(),
            show_all: true,
        };
        assert_eq!(
            filter_summary(&criteria).as_deref(),
            Some("Filtered by assigned: Amy, event: GLC, including inactive")
        );
        assert_eq!(filter_summary(&FilterCriteria::default()), None);
    }
}
