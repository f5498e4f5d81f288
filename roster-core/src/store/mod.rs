//! The remote schedule store.
//!
//! The store owns the records; roster reads and mutates them through the
//! [`ScheduleStore`] contract. [`RestStore`] talks to the hosted store over
//! HTTP; [`MemoryStore`] keeps records in-process.

mod memory;
mod rest;

pub use memory::{MemoryStore, StoreCall};
pub use rest::RestStore;

use async_trait::async_trait;

use crate::error::RosterResult;
use crate::record::{ScheduleFields, ScheduleId, ScheduleRecord};

/// The four ways the visible list can be fetched.
///
/// The store has no combined dynamic filter, so the client picks a shape
/// based on which criteria are populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Every record, ordered by `schedule_id` ascending.
    All,
    ByAssignee { assigned: String },
    ByEvent { event: String },
    ByAssigneeAndEvent { assigned: String, event: String },
}

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn list(&self) -> RosterResult<Vec<ScheduleRecord>>;

    async fn filter_by_assignee(&self, assigned: &str) -> RosterResult<Vec<ScheduleRecord>>;

    async fn filter_by_event(&self, event: &str) -> RosterResult<Vec<ScheduleRecord>>;

    async fn filter_by_assignee_and_event(
        &self,
        assigned: &str,
        event: &str,
    ) -> RosterResult<Vec<ScheduleRecord>>;

    async fn get(&self, id: ScheduleId) -> RosterResult<Option<ScheduleRecord>>;

    async fn create(&self, fields: &ScheduleFields) -> RosterResult<ScheduleRecord>;

    async fn update(&self, id: ScheduleId, fields: &ScheduleFields) -> RosterResult<ScheduleRecord>;

    async fn delete(&self, id: ScheduleId) -> RosterResult<()>;

    /// Run whichever entry point serves `query`.
    async fn fetch(&self, query: &Query) -> RosterResult<Vec<ScheduleRecord>> {
        match query {
            Query::All => self.list().await,
            Query::ByAssignee { assigned } => self.filter_by_assignee(assigned).await,
            Query::ByEvent { event } => self.filter_by_event(event).await,
            Query::ByAssigneeAndEvent { assigned, event } => {
                self.filter_by_assignee_and_event(assigned, event).await
            }
        }
    }
}
