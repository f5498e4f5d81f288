use anyhow::Result;
use roster_core::calendar::{CalendarCursor, CalendarView};

use crate::render;

pub async fn run(view: &str, date: Option<&str>, prev: Option<u32>, next: Option<u32>) -> Result<()> {
    let view: CalendarView = view.parse()?;
    let shell = super::open_shell().await?;

    let anchor = match date {
        Some(d) => super::parse_date(d)?,
        None => shell.formatter().today(),
    };

    let mut cursor = CalendarCursor::new(view, anchor);
    for _ in 0..prev.unwrap_or(0) {
        cursor.prev();
    }
    for _ in 0..next.unwrap_or(0) {
        cursor.next();
    }

    println!("{}", render::calendar(&cursor, shell.calendar_events(), shell.formatter()));
    Ok(())
}
