use anyhow::Result;
use roster_core::ScheduleColumn;

use crate::render;

pub async fn run(
    name: Option<String>,
    event: Option<String>,
    show_all: bool,
    sort: Vec<String>,
) -> Result<()> {
    let mut shell = super::open_shell().await?;

    if name.is_some() || event.is_some() || show_all {
        let mut filter = shell.open_filter();
        filter.set_assigned_name(name.unwrap_or_default());
        filter.set_event_name(event.unwrap_or_default());
        filter.set_show_all(show_all);
        filter.submit();
        super::sync(&mut shell).await?;
    }

    for column in &sort {
        shell.toggle_sort(column.parse::<ScheduleColumn>()?);
    }

    println!("{}", render::table(&shell.table_rows(), shell.sort(), shell.criteria()));
    Ok(())
}
