use anyhow::Result;
use owo_colors::OwoColorize;
use roster_core::ScheduleId;

pub async fn run(id: ScheduleId) -> Result<()> {
    let mut shell = super::open_shell().await?;

    let view = shell.open_detail(id).await;
    let Some(record) = view.record().cloned() else {
        anyhow::bail!("No schedule with id {id}");
    };

    view.delete(shell.store()).await?;

    println!(
        "{} Removed {} from {} (id {})",
        "-".red(),
        record.name,
        record.event_name,
        id
    );

    super::refetch_after_write(&mut shell).await;
    Ok(())
}
