use std::sync::Arc;

use super::ScheduleForm;
use crate::bus::{Bus, ScheduleEvent};
use crate::config::RosterConfig;
use crate::error::{RosterError, RosterResult};
use crate::record::{ScheduleId, ScheduleRecord};
use crate::store::ScheduleStore;

/// The edit sub-mode of the detail dialog.
pub struct EditModule {
    schedule_id: ScheduleId,
    original: Option<ScheduleRecord>,
    form: ScheduleForm,
    config: Arc<RosterConfig>,
    bus: Bus,
}

impl EditModule {
    /// Fetch the record and pre-populate the form from it.
    ///
    /// A failed or empty fetch leaves the fields blank.
    pub async fn open<S>(
        schedule_id: ScheduleId,
        store: &S,
        config: Arc<RosterConfig>,
        bus: Bus,
    ) -> Self
    where
        S: ScheduleStore + ?Sized,
    {
        let original = match store.get(schedule_id).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error fetching schedule {schedule_id}: {e}");
                None
            }
        };

        let form = original
            .as_ref()
            .map(ScheduleForm::from_record)
            .unwrap_or_default();

        EditModule {
            schedule_id,
            original,
            form,
            config,
            bus,
        }
    }

    pub fn schedule_id(&self) -> ScheduleId {
        self.schedule_id
    }

    /// The record as it was when the form opened.
    pub fn original(&self) -> Option<&ScheduleRecord> {
        self.original.as_ref()
    }

    pub fn form(&self) -> &ScheduleForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ScheduleForm {
        &mut self.form
    }

    pub async fn submit<S>(&mut self, store: &S) -> RosterResult<ScheduleRecord>
    where
        S: ScheduleStore + ?Sized,
    {
        let fields = self
            .form
            .validate(&self.config.choices)
            .map_err(RosterError::Validation)?;

        let record = store
            .update(self.schedule_id, &fields)
            .await
            .inspect_err(|e| log::error!("Update error for schedule {}: {e}", self.schedule_id))?;

        log::info!("Updated schedule {}", record.schedule_id);
        self.bus.publish(ScheduleEvent::Updated(record.clone()));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormField;
    use crate::mapper::tests::record;
    use crate::store::{MemoryStore, StoreCall};

    fn config() -> Arc<RosterConfig> {
        Arc::new(RosterConfig::default())
    }

    #[tokio::test]
    async fn prefills_from_store() {
        let store = MemoryStore::with_records(vec![record(1, "John", "Glc", "2025-08-03")]);
        let edit = EditModule::open(1, &store, config(), Bus::default()).await;

        assert_eq!(edit.form().name(), "John");
        assert_eq!(edit.form().event_name(), "GLC");
        assert!(edit.original().is_some());
    }

    #[tokio::test]
    async fn missing_record_leaves_fields_blank() {
        let store = MemoryStore::new();
        let mut edit = EditModule::open(42, &store, config(), Bus::default()).await;

        assert_eq!(edit.form().name(), "");
        assert!(edit.original().is_none());

        let err = edit.submit(&store).await.unwrap_err();
        assert!(matches!(err, RosterError::Validation(ref e) if e.get(FormField::Name).is_some()));
    }

    #[tokio::test]
    async fn submit_updates_by_schedule_id() {
        let store = MemoryStore::with_records(vec![record(1, "John", "GLC", "2025-08-03")]);
        let bus = Bus::default();
        let mut rx = bus.subscribe();
        let mut edit = EditModule::open(1, &store, config(), bus).await;

        edit.form_mut().set_event_name("SUNDAY");
        let updated = edit.submit(&store).await.unwrap();

        assert_eq!(updated.event_name, "SUNDAY");
        assert!(matches!(
            store.calls().await.last(),
            Some(StoreCall::Update(1, fields)) if fields.event_name == "SUNDAY"
        ));
        assert_eq!(rx.try_recv().unwrap(), ScheduleEvent::Updated(updated));
    }
}
