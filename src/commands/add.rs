use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run(name: String, event: String, date: &str) -> Result<()> {
    let mut shell = super::open_shell().await?;

    let mut add = shell.open_add();
    add.form_mut().set_name(name);
    add.form_mut().set_event_name(event);
    add.form_mut().set_schedule_date(Some(super::parse_date(date)?));

    let record = add.submit(shell.store()).await.map_err(super::submit_error)?;

    println!(
        "{} Scheduled {} for {} on {} (id {})",
        "+".green(),
        record.name.bold(),
        record.event_name,
        shell
            .formatter()
            .date(record.schedule_date, roster_core::date::DateSurface::Table),
        record.schedule_id
    );

    super::refetch_after_write(&mut shell).await;
    Ok(())
}
