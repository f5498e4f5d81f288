//! Field state shared by the add and edit forms.

use super::{FieldErrors, FormField};
use crate::choices::Choices;
use crate::date::ScheduleDate;
use crate::record::{ScheduleFields, ScheduleRecord};

/// Name, event and date inputs. All three are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleForm {
    name: String,
    event_name: String,
    schedule_date: Option<ScheduleDate>,
    errors: FieldErrors,
}

impl ScheduleForm {
    /// Pre-populate from an existing record. The event is upper-cased to
    /// match the canonical casing of the choice list.
    pub fn from_record(record: &ScheduleRecord) -> Self {
        ScheduleForm {
            name: record.name.clone(),
            event_name: record.event_name.to_uppercase(),
            schedule_date: Some(record.schedule_date),
            errors: FieldErrors::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn schedule_date(&self) -> Option<ScheduleDate> {
        self.schedule_date
    }

    /// Messages from the last failed validation.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.errors.0.remove(&FormField::Name);
    }

    pub fn set_event_name(&mut self, event_name: impl Into<String>) {
        self.event_name = event_name.into();
        self.errors.0.remove(&FormField::EventName);
    }

    pub fn set_schedule_date(&mut self, date: Option<ScheduleDate>) {
        self.schedule_date = date;
        self.errors.0.remove(&FormField::ScheduleDate);
    }

    /// Check every field, keeping the messages for display. On success the
    /// values come back in their canonical spelling.
    pub fn validate(&mut self, choices: &Choices) -> Result<ScheduleFields, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "is required");
            None
        } else {
            let found = choices.canonical_name(&self.name);
            if found.is_none() {
                errors.insert(FormField::Name, format!("'{}' is not an assignable person", self.name));
            }
            found
        };

        let event_name = if self.event_name.trim().is_empty() {
            errors.insert(FormField::EventName, "is required");
            None
        } else {
            let found = choices.canonical_event(&self.event_name);
            if found.is_none() {
                errors.insert(FormField::EventName, format!("'{}' is not a known event", self.event_name));
            }
            found
        };

        if self.schedule_date.is_none() {
            errors.insert(FormField::ScheduleDate, "is required");
        }

        match (name, event_name, self.schedule_date) {
            (Some(name), Some(event_name), Some(schedule_date)) if errors.is_empty() => {
                let fields = ScheduleFields {
                    name: name.to_string(),
                    event_name: event_name.to_string(),
                    schedule_date,
                };
                self.errors = FieldErrors::default();
                Ok(fields)
            }
            _ => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
