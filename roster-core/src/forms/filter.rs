use std::sync::Arc;

use crate::bus::{Bus, ScheduleEvent};
use crate::config::RosterConfig;
use crate::filter::FilterCriteria;

/// The filter dialog. Both fields are optional; submitting never touches
/// the store, it hands the new criteria to the Shell.
pub struct FilterModule {
    assigned_name: String,
    event_name: String,
    show_all: bool,
    config: Arc<RosterConfig>,
    bus: Bus,
}

impl FilterModule {
    /// Open pre-populated with the criteria currently in effect.
    pub fn new(current: &FilterCriteria, config: Arc<RosterConfig>, bus: Bus) -> Self {
        FilterModule {
            assigned_name: current.assigned_name.clone(),
            event_name: current.event_name.clone(),
            show_all: current.show_all,
            config,
            bus,
        }
    }

    pub fn assigned_name(&self) -> &str {
        &self.assigned_name
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_assigned_name(&mut self, name: impl Into<String>) {
        self.assigned_name = name.into();
    }

    pub fn set_event_name(&mut self, event: impl Into<String>) {
        self.event_name = event.into();
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Reset every field without submitting.
    pub fn clear(&mut self) {
        self.assigned_name.clear();
        self.event_name.clear();
        self.show_all = false;
    }

    /// Criteria for the current field values. Values matching a choice take
    /// its canonical spelling; anything else is passed through trimmed.
    pub fn criteria(&self) -> FilterCriteria {
        let choices = &self.config.choices;
        let name = self.assigned_name.trim();
        let event = self.event_name.trim();

        FilterCriteria {
            assigned_name: choices.canonical_name(name).unwrap_or(name).to_string(),
            event_name: choices.canonical_event(event).unwrap_or(event).to_string(),
            show_all: self.show_all,
        }
    }

    pub fn submit(&self) -> FilterCriteria {
        let criteria = self.criteria();
        log::debug!("Applying filter {criteria:?}");
        self.bus.publish(ScheduleEvent::FilterApplied(criteria.clone()));
        criteria
    }
}
