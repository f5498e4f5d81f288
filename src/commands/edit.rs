use anyhow::Result;
use owo_colors::OwoColorize;
use roster_core::ScheduleId;

use crate::render;

pub async fn run(
    id: ScheduleId,
    name: Option<String>,
    event: Option<String>,
    date: Option<&str>,
) -> Result<()> {
    let mut shell = super::open_shell().await?;

    let view = shell.open_detail(id).await;
    let Some(before) = view.record().cloned() else {
        anyhow::bail!("No schedule with id {id}");
    };

    let Some(mut edit) = shell.enter_edit(&view).await else {
        anyhow::bail!("Schedule {id} is not open for editing");
    };

    if let Some(name) = name {
        edit.form_mut().set_name(name);
    }
    if let Some(event) = event {
        edit.form_mut().set_event_name(event);
    }
    if let Some(date) = date {
        edit.form_mut().set_schedule_date(Some(super::parse_date(date)?));
    }

    let after = edit.submit(shell.store()).await.map_err(super::submit_error)?;

    println!("{} Updated schedule {}", "~".yellow(), id);
    for line in render::field_changes(&before, &after, shell.formatter()) {
        println!("   {line}");
    }

    super::refetch_after_write(&mut shell).await;
    Ok(())
}
