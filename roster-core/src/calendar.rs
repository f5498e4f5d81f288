//! Calendar navigation: which days are visible and which events fall in them.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::date::{DateFormatter, DateSurface, ScheduleDate};
use crate::error::RosterError;
use crate::mapper::CalendarEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalendarView::Day => "day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
            CalendarView::Year => "year",
        })
    }
}

impl FromStr for CalendarView {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(CalendarView::Day),
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            "year" => Ok(CalendarView::Year),
            _ => Err(RosterError::Config(format!(
                "Unknown calendar view '{s}'. Expected day, week, month or year"
            ))),
        }
    }
}

/// A view kind anchored on a date. Prev/next move by one view-length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    view: CalendarView,
    anchor: NaiveDate,
}

impl CalendarCursor {
    pub fn new(view: CalendarView, anchor: ScheduleDate) -> Self {
        CalendarCursor {
            view,
            anchor: anchor.date(),
        }
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    pub fn anchor(&self) -> ScheduleDate {
        ScheduleDate::new(self.anchor)
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn today(&mut self, today: ScheduleDate) {
        self.anchor = today.date();
    }

    pub fn next(&mut self) {
        let moved = match self.view {
            CalendarView::Day => self.anchor.checked_add_days(Days::new(1)),
            CalendarView::Week => self.anchor.checked_add_days(Days::new(7)),
            CalendarView::Month => self.anchor.checked_add_months(Months::new(1)),
            CalendarView::Year => self.anchor.checked_add_months(Months::new(12)),
        };
        self.anchor = moved.unwrap_or(self.anchor);
    }

    pub fn prev(&mut self) {
        let moved = match self.view {
            CalendarView::Day => self.anchor.checked_sub_days(Days::new(1)),
            CalendarView::Week => self.anchor.checked_sub_days(Days::new(7)),
            CalendarView::Month => self.anchor.checked_sub_months(Months::new(1)),
            CalendarView::Year => self.anchor.checked_sub_months(Months::new(12)),
        };
        self.anchor = moved.unwrap_or(self.anchor);
    }

    /// First and last visible day, inclusive. Weeks start on Sunday.
    pub fn range(&self) -> (ScheduleDate, ScheduleDate) {
        let a = self.anchor;
        let (first, last) = match self.view {
            CalendarView::Day => (a, a),
            CalendarView::Week => {
                let first = a
                    .checked_sub_days(Days::new(a.weekday().num_days_from_sunday().into()))
                    .unwrap_or(a);
                (first, first.checked_add_days(Days::new(6)).unwrap_or(first))
            }
            CalendarView::Month => {
                let first = a.checked_sub_days(Days::new(a.day0().into())).unwrap_or(a);
                let last = first
                    .checked_add_months(Months::new(1))
                    .and_then(|d| d.checked_sub_days(Days::new(1)))
                    .unwrap_or(first);
                (first, last)
            }
            CalendarView::Year => {
                let first = a.checked_sub_days(Days::new(a.ordinal0().into())).unwrap_or(a);
                let last = first
                    .checked_add_months(Months::new(12))
                    .and_then(|d| d.checked_sub_days(Days::new(1)))
                    .unwrap_or(first);
                (first, last)
            }
        };
        (ScheduleDate::new(first), ScheduleDate::new(last))
    }

    /// Heading for the visible range, e.g. "August 2025".
    pub fn title(&self, formatter: &DateFormatter) -> String {
        let (first, last) = self.range();
        match self.view {
            CalendarView::Day => formatter.date(first, DateSurface::Detail),
            CalendarView::Week => format!(
                "{} – {}",
                formatter.date(first, DateSurface::CalendarWeek),
                formatter.date(last, DateSurface::CalendarWeek)
            ),
            CalendarView::Month => formatter.date(first, DateSurface::CalendarMonth),
            CalendarView::Year => formatter.date(first, DateSurface::CalendarYear),
        }
    }

    /// Events overlapping the visible range, by start date then id order.
    pub fn visible<'a>(&self, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        let (first, last) = self.range();
        let mut visible: Vec<_> = events
            .iter()
            .filter(|e| e.start <= last && e.end >= first)
            .collect();
        visible.sort_by_key(|e| e.start);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> ScheduleDate {
        ScheduleDate::from_ymd(y, m, d).unwrap()
    }

    fn event(id: &str, day: ScheduleDate) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            start: day,
            end: day,
            title: format!("event {id}"),
        }
    }

    #[test]
    fn month_range_covers_whole_month() {
        let cursor = CalendarCursor::new(CalendarView::Month, date(2025, 2, 14));
        assert_eq!(cursor.range(), (date(2025, 2, 1), date(2025, 2, 28)));
        assert_eq!(cursor.title(&DateFormatter::default()), "February 2025");
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2025-08-06 is a Wednesday
        let cursor = CalendarCursor::new(CalendarView::Week, date(2025, 8, 6));
        assert_eq!(cursor.range(), (date(2025, 8, 3), date(2025, 8, 9)));
        assert_eq!(
            cursor.title(&DateFormatter::default()),
            "Aug 3, 2025 – Aug 9, 2025"
        );
    }

    #[test]
    fn year_range() {
        let cursor = CalendarCursor::new(CalendarView::Year, date(2024, 6, 30));
        assert_eq!(cursor.range(), (date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn navigation_moves_by_view_length() {
        let mut cursor = CalendarCursor::new(CalendarView::Month, date(2025, 1, 31));
        cursor.next();
        assert_eq!(cursor.anchor(), date(2025, 2, 28));
        cursor.prev();
        cursor.prev();
        assert_eq!(cursor.anchor(), date(2024, 12, 28));

        cursor.set_view(CalendarView::Day);
        cursor.next();
        assert_eq!(cursor.anchor(), date(2024, 12, 29));

        cursor.today(date(2025, 8, 3));
        assert_eq!(cursor.anchor(), date(2025, 8, 3));
    }

    #[test]
    fn visible_selects_events_in_range() {
        let events = vec![
            event("2", date(2025, 8, 10)),
            event("1", date(2025, 8, 3)),
            event("3", date(2025, 9, 1)),
        ];
        let cursor = CalendarCursor::new(CalendarView::Month, date(2025, 8, 15));

        let ids: Vec<_> = cursor.visible(&events).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn view_names_parse() {
        assert_eq!("Week".parse::<CalendarView>().unwrap(), CalendarView::Week);
        assert!("fortnight".parse::<CalendarView>().is_err());
    }
}
