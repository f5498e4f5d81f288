pub mod add;
pub mod calendar;
pub mod choices;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;

use std::sync::Arc;

use anyhow::Result;
use roster_core::config::RosterConfig;
use roster_core::date::ScheduleDate;
use roster_core::store::{RestStore, ScheduleStore};
use roster_core::{FetchOutcome, RosterError, Shell};

use crate::render;

/// Load configuration, writing a commented template on first run.
pub fn load_config() -> Result<Arc<RosterConfig>> {
    let path = RosterConfig::config_path()?;
    if !path.exists() {
        RosterConfig::create_default_config(&path)?;
        log::info!("Wrote default config to {}", path.display());
    }
    log::debug!("Loading config from {}", path.display());
    Ok(Arc::new(RosterConfig::load_from(&path)?))
}

/// Connect to the store and load the initial list.
pub async fn open_shell() -> Result<Shell<RestStore>> {
    let config = load_config()?;
    let store = RestStore::new(&config)?;
    let mut shell = Shell::new(store, config);

    sync(&mut shell).await?;
    Ok(shell)
}

/// Apply pending dialog results and refetch if needed.
pub async fn sync(shell: &mut Shell<RestStore>) -> Result<()> {
    if let Some(FetchOutcome::Failed) = shell.sync().await {
        anyhow::bail!("Could not fetch schedules from the store");
    }
    Ok(())
}

/// Refetch after a write that already succeeded. A failed refetch is only
/// logged; the write itself stands.
pub async fn refetch_after_write<S: ScheduleStore>(shell: &mut Shell<S>) -> Option<FetchOutcome> {
    let outcome = shell.sync().await;
    if outcome == Some(FetchOutcome::Failed) {
        log::warn!("Saved, but could not reload schedules from the store");
    }
    outcome
}

pub fn parse_date(s: &str) -> Result<ScheduleDate> {
    Ok(ScheduleDate::parse(s)?)
}

/// Turn a submit error into a CLI error, listing field messages for
/// validation failures.
pub fn submit_error(e: RosterError) -> anyhow::Error {
    match e {
        RosterError::Validation(errors) => {
            anyhow::anyhow!("Invalid schedule:\n{}", render::field_errors(&errors))
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::store::MemoryStore;

    #[tokio::test]
    async fn failed_refetch_after_write_is_not_an_error() {
        let mut shell = Shell::new(MemoryStore::new(), Arc::new(RosterConfig::default()));
        shell.sync().await;

        let mut add = shell.open_add();
        add.form_mut().set_name("John");
        add.form_mut().set_event_name("GLC");
        add.form_mut().set_schedule_date(Some(parse_date("2025-08-03").unwrap()));
        add.submit(shell.store()).await.unwrap();

        shell.store().set_failing(true);
        assert_eq!(refetch_after_write(&mut shell).await, Some(FetchOutcome::Failed));

        shell.store().set_failing(false);
        assert_eq!(shell.store().records().await.len(), 1);
    }
}
