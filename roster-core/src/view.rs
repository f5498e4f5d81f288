//! Read-only detail view of one schedule.

use crate::bus::{Bus, ScheduleEvent};
use crate::date::{DateFormatter, DateSurface};
use crate::error::RosterResult;
use crate::modal::Modal;
use crate::record::{ScheduleId, ScheduleRecord};
use crate::store::ScheduleStore;

pub struct ViewModule {
    schedule_id: ScheduleId,
    record: Option<ScheduleRecord>,
    bus: Bus,
}

impl ViewModule {
    /// Fetch the record. A failed or empty fetch shows blank fields.
    pub async fn open<S>(schedule_id: ScheduleId, store: &S, bus: Bus) -> Self
    where
        S: ScheduleStore + ?Sized,
    {
        let record = match store.get(schedule_id).await {
            Ok(record) => record,
            Err(e) => {
                log::error!("Error fetching schedule {schedule_id}: {e}");
                None
            }
        };

        ViewModule {
            schedule_id,
            record,
            bus,
        }
    }

    pub fn schedule_id(&self) -> ScheduleId {
        self.schedule_id
    }

    pub fn record(&self) -> Option<&ScheduleRecord> {
        self.record.as_ref()
    }

    /// Labelled values in display order.
    pub fn details(&self, formatter: &DateFormatter) -> Vec<(&'static str, String)> {
        let r = self.record.as_ref();

        vec![
            ("Assigned", r.map(|r| r.name.clone()).unwrap_or_default()),
            ("Event", r.map(|r| r.event_name.clone()).unwrap_or_default()),
            ("ID", self.schedule_id.to_string()),
            (
                "Schedule Date",
                r.map(|r| formatter.date(r.schedule_date, DateSurface::Detail))
                    .unwrap_or_default(),
            ),
            ("Created by", r.and_then(|r| r.created_by.clone()).unwrap_or_default()),
            ("Created Date", formatter.timestamp(r.and_then(|r| r.created_at))),
            ("Updated by", r.and_then(|r| r.updated_by.clone()).unwrap_or_default()),
            ("Updated Date", formatter.timestamp(r.and_then(|r| r.updated_at))),
            (
                "Status",
                r.map(|r| if r.is_active { "Active" } else { "Inactive" }.to_string())
                    .unwrap_or_default(),
            ),
        ]
    }

    /// Switch the surrounding detail dialog to edit mode for this record.
    /// Nothing is refetched and the dialog stays open.
    pub fn edit(&self, modal: &mut Modal) -> bool {
        let same_record = matches!(
            modal,
            Modal::Detail { schedule_id, .. } if *schedule_id == self.schedule_id
        );
        same_record && modal.enter_edit()
    }

    pub async fn delete<S>(&self, store: &S) -> RosterResult<()>
    where
        S: ScheduleStore + ?Sized,
    {
        store
            .delete(self.schedule_id)
            .await
            .inspect_err(|e| log::error!("Error deleting schedule {}: {e}", self.schedule_id))?;

        log::info!("Deleted schedule {}", self.schedule_id);
        self.bus.publish(ScheduleEvent::Deleted(self.schedule_id));
        Ok(())
    }
}
