//! Enumerated values offered by the schedule forms.

use serde::Deserialize;

const DEFAULT_NAMES: [&str; 15] = [
    "Dudong", "Oshin", "Mac", "Malore", "Robin", "Jeno", "Irene", "Janzen", "Amy", "Ember",
    "Keziah", "JL", "Juvy", "Adi", "John",
];

const DEFAULT_EVENTS: [&str; 9] = [
    "SUNDAY",
    "ACROSS",
    "ELEVATE",
    "B1G",
    "MOVEMENT",
    "WOMEN2WOMEN",
    "E-MINI",
    "GLC",
    "SHEPHERD",
];

/// The people and events a schedule can be assigned to.
///
/// Built once as part of [`crate::config::RosterConfig`] and shared by every
/// form, so the add, edit and filter forms can never disagree on the lists.
/// Event values are kept in their canonical (upper) casing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choices {
    #[serde(default = "default_names")]
    names: Vec<String>,
    #[serde(default = "default_events", deserialize_with = "deserialize_events")]
    events: Vec<String>,
}

fn default_names() -> Vec<String> {
    DEFAULT_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_events() -> Vec<String> {
    DEFAULT_EVENTS.iter().map(|s| s.to_string()).collect()
}

fn deserialize_events<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let events = Vec::<String>::deserialize(deserializer)?;
    Ok(events.iter().map(|e| e.to_uppercase()).collect())
}

impl Default for Choices {
    fn default() -> Self {
        Choices {
            names: default_names(),
            events: default_events(),
        }
    }
}

impl Choices {
    pub fn new(names: Vec<String>, events: Vec<String>) -> Self {
        Choices {
            names,
            events: events.iter().map(|e| e.to_uppercase()).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Look up a name ignoring case, returning the configured spelling.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(name.trim()))
            .map(String::as_str)
    }

    /// Look up an event ignoring case, returning the canonical upper-case value.
    pub fn canonical_event(&self, event: &str) -> Option<&str> {
        self.events
            .iter()
            .find(|e| e.eq_ignore_ascii_case(event.trim()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_include_every_known_entry() {
        let choices = Choices::default();
        assert_eq!(choices.names().len(), 15);
        assert_eq!(choices.events().len(), 9);
        assert!(choices.names().iter().any(|n| n == "Malore"));
    }

    #[test]
    fn event_lookup_returns_canonical_casing() {
        let choices = Choices::default();
        assert_eq!(choices.canonical_event("Sunday"), Some("SUNDAY"));
        assert_eq!(choices.canonical_event("women2women"), Some("WOMEN2WOMEN"));
        assert_eq!(choices.canonical_event("Brunch"), None);
    }

    #[test]
    fn name_lookup_keeps_configured_spelling() {
        let choices = Choices::default();
        assert_eq!(choices.canonical_name("jl"), Some("JL"));
        assert_eq!(choices.canonical_name(" john "), Some("John"));
        assert_eq!(choices.canonical_name("Nobody"), None);
    }

    #[test]
    fn custom_events_are_upper_cased() {
        let choices = Choices::new(vec!["Amy".into()], vec!["Retreat".into()]);
        assert_eq!(choices.events(), ["RETREAT".to_string()]);
    }
}
