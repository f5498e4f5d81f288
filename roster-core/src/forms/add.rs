use std::sync::Arc;

use super::ScheduleForm;
use crate::bus::{Bus, ScheduleEvent};
use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};
use crate::record::ScheduleRecord;
use crate::store::ScheduleStore;

/// The "add schedule" dialog.
pub struct AddModule {
    form: ScheduleForm,
    config: Arc<RosterConfig>,
    bus: Bus,
}

impl AddModule {
    pub fn new(config: Arc<RosterConfig>, bus: Bus) -> Self {
        AddModule {
            form: ScheduleForm::default(),
            config,
            bus,
        }
    }

    pub fn form(&self) -> &ScheduleForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ScheduleForm {
        &mut self.form
    }

    /// Validate, create the record, then announce it.
    ///
    /// Invalid input never reaches the store. A store failure is logged and
    /// returned without publishing anything.
    pub async fn submit<S>(&mut self, store: &S) -> RosterResult<ScheduleRecord>
    where
        S: ScheduleStore + ?Sized,
    {
        let fields = self
            .form
            .validate(&self.config.choices)
            .map_err(RosterError::Validation)?;

        let record = store.create(&fields).await.inspect_err(|e| {
            log::error!("Error creating schedule: {e}");
        })?;

        log::info!(
            "Created schedule {} ({} / {} on {})",
            record.schedule_id,
            record.name,
            record.event_name,
            record.schedule_date
        );
        self.bus.publish(ScheduleEvent::Created(record.clone()));
        Ok(record)
    }
}
