use anyhow::Result;
use roster_core::ScheduleId;

use crate::render;

pub async fn run(id: ScheduleId) -> Result<()> {
    let mut shell = super::open_shell().await?;
    let view = shell.open_detail(id).await;

    if view.record().is_none() {
        anyhow::bail!("No schedule with id {id}");
    }

    println!("{}", render::details(&view.details(shell.formatter())));
    Ok(())
}
