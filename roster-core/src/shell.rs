//! The coordinator behind the schedule screen.
//!
//! The Shell owns the cached record list, the calendar events derived from
//! it, the filter criteria, the sort state and the dialog state. Dialogs
//! never touch the list: they report completed actions on the [`Bus`], and
//! the Shell answers each one by closing the dialog and bumping its refresh
//! counter. [`Shell::sync`] then issues the fetch matching the current
//! criteria.
//!
//! Every fetch carries a generation number. Only the newest generation may
//! replace the list, so a slow response to an older request can never
//! overwrite a newer one.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::bus::{Bus, ScheduleEvent};
use crate::config::RosterConfig;
use crate::date::DateFormatter;
use crate::error::RosterResult;
use crate::filter::FilterCriteria;
use crate::forms::{AddModule, EditModule, FilterModule};
use crate::mapper::{self, CalendarEvent, TableRow};
use crate::modal::Modal;
use crate::record::{ScheduleColumn, ScheduleId, ScheduleRecord};
use crate::sort::SortState;
use crate::store::{Query, ScheduleStore};
use crate::view::ViewModule;

/// A dispatched fetch, to be handed back to [`Shell::apply_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: Query,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

/// What happened to a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list and calendar events were replaced.
    Applied,
    /// The store failed; the previous list is kept.
    Failed,
    /// A newer fetch was issued meanwhile; the result was discarded.
    Stale,
}

pub struct Shell<S: ScheduleStore> {
    store: S,
    config: Arc<RosterConfig>,
    formatter: DateFormatter,
    bus: Bus,
    events: broadcast::Receiver<ScheduleEvent>,

    records: Vec<ScheduleRecord>,
    calendar_events: Vec<CalendarEvent>,
    criteria: FilterCriteria,
    sort: SortState,
    modal: Modal,

    refresh: u64,
    dispatched_refresh: Option<u64>,
    generation: u64,
    loading: bool,
}

impl<S: ScheduleStore> Shell<S> {
    pub fn new(store: S, config: Arc<RosterConfig>) -> Self {
        let bus = Bus::default();
        let events = bus.subscribe();
        let formatter = DateFormatter::from_config(&config);

        Shell {
            store,
            config,
            formatter,
            bus,
            events,
            records: Vec::new(),
            calendar_events: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortState::default(),
            modal: Modal::default(),
            refresh: 0,
            dispatched_refresh: None,
            generation: 0,
            loading: true,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Arc<RosterConfig> {
        &self.config
    }

    pub fn formatter(&self) -> &DateFormatter {
        &self.formatter
    }

    /// Handle for dialogs to report completed actions on.
    pub fn bus(&self) -> Bus {
        self.bus.clone()
    }

    /// The cached list exactly as the store returned it.
    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn calendar_events(&self) -> &[CalendarEvent] {
        &self.calendar_events
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh
    }

    /// True until the first fetch has settled.
    ///
    /// The flag is cleared when a result (or failure) is applied, not when
    /// the request is dispatched, so an empty list is never mistaken for a
    /// loaded one.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Dialogs

    pub fn open_add(&mut self) -> AddModule {
        self.modal = Modal::Add;
        AddModule::new(self.config.clone(), self.bus())
    }

    pub fn open_filter(&mut self) -> FilterModule {
        self.modal = Modal::Filter;
        FilterModule::new(&self.criteria, self.config.clone(), self.bus())
    }

    /// Open the detail dialog for a row, always in view mode.
    pub async fn open_detail(&mut self, schedule_id: ScheduleId) -> ViewModule {
        self.modal.open_detail(schedule_id);
        ViewModule::open(schedule_id, &self.store, self.bus()).await
    }

    /// Follow the view's "Edit" transition and load the edit form. Returns
    /// `None` if that view's dialog is not open in view mode.
    pub async fn enter_edit(&mut self, view: &ViewModule) -> Option<EditModule> {
        if !view.edit(&mut self.modal) {
            return None;
        }
        Some(EditModule::open(view.schedule_id(), &self.store, self.config.clone(), self.bus()).await)
    }

    /// Dismiss the open dialog without any action.
    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    // Sorting

    pub fn toggle_sort(&mut self, column: ScheduleColumn) {
        self.sort.toggle(column);
    }

    // Events

    /// React to a completed dialog action.
    pub fn handle_event(&mut self, event: ScheduleEvent) {
        log::debug!("Handling {event:?}");
        if let ScheduleEvent::FilterApplied(criteria) = event {
            self.criteria = criteria;
        }
        self.modal.close();
        self.refresh += 1;
    }

    /// Drain the bus, handling every pending event. Returns how many were handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Lagged(missed)) => {
                    log::warn!("Missed {missed} schedule events; refreshing");
                    self.modal.close();
                    self.refresh += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return handled,
            }
        }
    }

    // Fetching

    /// Whether the refresh counter moved since the last dispatched fetch.
    pub fn needs_fetch(&self) -> bool {
        self.dispatched_refresh != Some(self.refresh)
    }

    /// Start a fetch for the current criteria. Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.dispatched_refresh = Some(self.refresh);

        let ticket = FetchTicket {
            generation: self.generation,
            query: self.criteria.query(),
        };
        log::debug!("Fetch #{} dispatched: {:?}", ticket.generation, ticket.query);
        ticket
    }

    /// Apply a fetch result if its ticket is still the newest.
    ///
    /// The calendar events are derived from the same result in the same
    /// step, so the list and the calendar never disagree.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: RosterResult<Vec<ScheduleRecord>>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "Fetch #{} discarded; #{} is newer",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(records) => {
                log::debug!("Fetch #{} applied: {} records", ticket.generation, records.len());
                self.calendar_events = mapper::to_calendar_events(&records);
                self.records = records;
                FetchOutcome::Applied
            }
            Err(e) => {
                log::error!("Error fetching schedules: {e}");
                FetchOutcome::Failed
            }
        }
    }

    /// Fetch now, regardless of the refresh counter.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.store.fetch(&ticket.query).await;
        self.apply_fetch(ticket, result)
    }

    /// Handle pending events, then fetch if anything asked for it.
    /// Returns `None` when no fetch was needed.
    pub async fn sync(&mut self) -> Option<FetchOutcome> {
        self.pump_events();
        if !self.needs_fetch() {
            return None;
        }
        Some(self.refresh().await)
    }

    // Derived views

    /// The list as shown: client-side filter pass, then sort.
    pub fn visible_records(&self) -> Vec<ScheduleRecord> {
        let mut visible = self.criteria.apply_local(&self.records);
        self.sort.apply(&mut visible);
        visible
    }

    pub fn table_rows(&self) -> Vec<TableRow> {
        mapper::to_table_rows(&self.visible_records(), &self.formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::tests::record;
    use crate::store::MemoryStore;

    fn shell(records: Vec<ScheduleRecord>) -> Shell<MemoryStore> {
        Shell::new(MemoryStore::with_records(records), Arc::new(RosterConfig::default()))
    }

    #[tokio::test]
    async fn first_sync_fetches_and_clears_loading() {
        let mut shell = shell(vec![record(1, "John", "GLC", "2025-08-03")]);
        assert!(shell.is_loading());

        assert_eq!(shell.sync().await, Some(FetchOutcome::Applied));
        assert!(!shell.is_loading());
        assert_eq!(shell.records().len(), 1);
        assert_eq!(shell.calendar_events()[0].id, "1");

        // Nothing changed, nothing to fetch
        assert_eq!(shell.sync().await, None);
        assert_eq!(shell.store().fetch_count().await, 1);
    }

    #[tokio::test]
    async fn lagging_behind_the_bus_closes_dialog_and_refreshes() {
        let mut shell = shell(vec![]);
        shell.sync().await;
        let _add = shell.open_add();

        // Overflow the 64-slot bus before the Shell drains it
        let bus = shell.bus();
        for id in 0..70 {
            bus.publish(ScheduleEvent::Deleted(id));
        }

        let handled = shell.pump_events();
        assert_eq!(handled, 64);
        assert_eq!(shell.refresh_count(), 65);
        assert_eq!(shell.modal(), Modal::Closed);
        assert!(shell.needs_fetch());
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let mut shell = shell(vec![]);
        let older = shell.begin_fetch();
        let newer = shell.begin_fetch();

        let outcome = shell.apply_fetch(newer, Ok(vec![record(2, "Amy", "SUNDAY", "2025-08-10")]));
        assert_eq!(outcome, FetchOutcome::Applied);

        let outcome = shell.apply_fetch(older, Ok(vec![record(1, "John", "GLC", "2025-08-03")]));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(shell.records()[0].schedule_id, 2);
        assert_eq!(shell.calendar_events()[0].title, "Amy");
    }

    #[tokio::test]
    async fn stale_result_does_not_clear_loading() {
        let mut shell = shell(vec![]);
        let older = shell.begin_fetch();
        let _newer = shell.begin_fetch();

        shell.apply_fetch(older, Ok(vec![]));
        assert!(shell.is_loading());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_list() {
        let mut shell = shell(vec![record(1, "John", "GLC", "2025-08-03")]);
        shell.refresh().await;

        shell.store().set_failing(true);
        assert_eq!(shell.refresh().await, FetchOutcome::Failed);
        assert_eq!(shell.records().len(), 1);
        assert_eq!(shell.calendar_events().len(), 1);
    }

    #[tokio::test]
    async fn filter_event_replaces_criteria_and_closes_dialog() {
        let mut shell = shell(vec![]);
        shell.sync().await;

        let mut filter = shell.open_filter();
        assert_eq!(shell.modal(), Modal::Filter);
        filter.set_assigned_name("John");
        filter.submit();

        assert_eq!(shell.pump_events(), 1);
        assert_eq!(shell.modal(), Modal::Closed);
        assert_eq!(shell.criteria(), &FilterCriteria::new("John", ""));
        assert_eq!(shell.refresh_count(), 1);
        assert!(shell.needs_fetch());
    }

    #[tokio::test]
    async fn enter_edit_requires_open_view() {
        let mut shell = shell(vec![record(1, "John", "GLC", "2025-08-03")]);
        let view = shell.open_detail(1).await;

        shell.close_modal();
        assert!(shell.enter_edit(&view).await.is_none());

        let view = shell.open_detail(1).await;
        let edit = shell.enter_edit(&view).await.expect("edit form");
        assert_eq!(edit.form().name(), "John");
        assert!(shell.enter_edit(&view).await.is_none());
    }

    #[tokio::test]
    async fn local_pass_runs_before_sort() {
        let mut inactive = record(3, "Amy", "B1G", "2025-08-17");
        inactive.is_active = false;
        let mut shell = shell(vec![
            record(1, "John", "GLC", "2025-08-03"),
            record(2, "Amy", "SUNDAY", "2025-08-10"),
            inactive,
        ]);
        shell.sync().await;
        shell.toggle_sort(ScheduleColumn::Assigned);

        let ids: Vec<_> = shell.visible_records().iter().map(|r| r.schedule_id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(shell.table_rows()[0].schedule_date, "08/10/2025");
    }
}
