//! Add, edit and filter forms.
//!
//! Each module owns its field values, validates them against the shared
//! [`Choices`](crate::choices::Choices), performs at most one remote call on
//! submit and announces success on the [`Bus`](crate::bus::Bus). Failures
//! are logged and returned; nothing is published, so the dialog stays open.

mod add;
mod edit;
mod filter;
mod schedule;

pub use add::AddModule;
pub use edit::EditModule;
pub use filter::FilterModule;
pub use schedule::ScheduleForm;

use std::collections::BTreeMap;
use std::fmt;

/// A field of the schedule forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    EventName,
    ScheduleDate,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::EventName => "Event",
            FormField::ScheduleDate => "Schedule",
        }
    }
}

/// Per-field validation messages, shown next to the offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.label(), message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
