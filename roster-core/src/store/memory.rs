//! In-process schedule store.
//!
//! Behaves like the hosted store (ids assigned on create, provenance
//! stamped on write, filter entry points matching case-insensitively) and
//! records every call it receives, so coordination logic can be exercised
//! without a network.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{Query, ScheduleStore};
use crate::error::{RosterError, RosterResult};
use crate::record::{ScheduleFields, ScheduleId, ScheduleRecord};

const AUTHOR: &str = "roster";

/// A call received by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch(Query),
    Get(ScheduleId),
    Create(ScheduleFields),
    Update(ScheduleId, ScheduleFields),
    Delete(ScheduleId),
}

#[derive(Default)]
struct State {
    records: Vec<ScheduleRecord>,
    next_id: ScheduleId,
    calls: Vec<StoreCall>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ScheduleRecord>) -> Self {
        let next_id = records.iter().map(|r| r.schedule_id).max().unwrap_or(0);
        MemoryStore {
            state: Mutex::new(State {
                records,
                next_id,
                calls: Vec::new(),
            }),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail with a store error until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of list/filter fetches served so far.
    pub async fn fetch_count(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Fetch(_)))
            .count()
    }

    pub async fn records(&self) -> Vec<ScheduleRecord> {
        self.state.lock().await.records.clone()
    }

    fn check(&self) -> RosterResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RosterError::Store {
                status: 503,
                message: "store unavailable".into(),
            });
        }
        Ok(())
    }

    async fn select(
        &self,
        query: Query,
        keep: impl Fn(&ScheduleRecord) -> bool,
    ) -> RosterResult<Vec<ScheduleRecord>> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Fetch(query));
        self.check()?;

        let mut rows: Vec<_> = state.records.iter().filter(|r| keep(r)).cloned().collect();
        rows.sort_by_key(|r| r.schedule_id);
        Ok(rows)
    }
}

fn not_found(id: ScheduleId) -> RosterError {
    RosterError::Store {
        status: 404,
        message: format!("No schedule with id {id}"),
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list(&self) -> RosterResult<Vec<ScheduleRecord>> {
        self.select(Query::All, |_| true).await
    }

    async fn filter_by_assignee(&self, assigned: &str) -> RosterResult<Vec<ScheduleRecord>> {
        let query = Query::ByAssignee { assigned: assigned.to_string() };
        self.select(query, |r| r.name.eq_ignore_ascii_case(assigned)).await
    }

    async fn filter_by_event(&self, event: &str) -> RosterResult<Vec<ScheduleRecord>> {
        let query = Query::ByEvent { event: event.to_string() };
        self.select(query, |r| r.event_name.eq_ignore_ascii_case(event)).await
    }

    async fn filter_by_assignee_and_event(
        &self,
        assigned: &str,
        event: &str,
    ) -> RosterResult<Vec<ScheduleRecord>> {
        let query = Query::ByAssigneeAndEvent {
            assigned: assigned.to_string(),
            event: event.to_string(),
        };
        self.select(query, |r| {
            r.name.eq_ignore_ascii_case(assigned) && r.event_name.eq_ignore_ascii_case(event)
        })
        .await
    }

    async fn get(&self, id: ScheduleId) -> RosterResult<Option<ScheduleRecord>> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Get(id));
        self.check()?;

        Ok(state.records.iter().find(|r| r.schedule_id == id).cloned())
    }

    async fn create(&self, fields: &ScheduleFields) -> RosterResult<ScheduleRecord> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Create(fields.clone()));
        self.check()?;

        state.next_id += 1;
        let record = ScheduleRecord {
            schedule_id: state.next_id,
            name: fields.name.clone(),
            event_name: fields.event_name.clone(),
            schedule_date: fields.schedule_date,
            created_by: Some(AUTHOR.to_string()),
            created_at: Some(Utc::now()),
            updated_by: None,
            updated_at: None,
            is_active: true,
        };
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: ScheduleId, fields: &ScheduleFields) -> RosterResult<ScheduleRecord> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Update(id, fields.clone()));
        self.check()?;

        let record = state
            .records
            .iter_mut()
            .find(|r| r.schedule_id == id)
            .ok_or_else(|| not_found(id))?;

        record.name = fields.name.clone();
        record.event_name = fields.event_name.clone();
        record.schedule_date = fields.schedule_date;
        record.updated_by = Some(AUTHOR.to_string());
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, id: ScheduleId) -> RosterResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(StoreCall::Delete(id));
        self.check()?;

        let before = state.records.len();
        state.records.retain(|r| r.schedule_id != id);
        if state.records.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
