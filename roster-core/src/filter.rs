//! Filter criteria and the client-side filter pass.

use serde::{Deserialize, Serialize};

use crate::record::ScheduleRecord;
use crate::store::Query;

/// Constraints on the visible schedule list. Empty strings mean
/// "no constraint on this field".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub assigned_name: String,
    pub event_name: String,
    /// Include inactive records.
    pub show_all: bool,
}

impl FilterCriteria {
    pub fn new(assigned_name: impl Into<String>, event_name: impl Into<String>) -> Self {
        FilterCriteria {
            assigned_name: assigned_name.into(),
            event_name: event_name.into(),
            show_all: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_name.is_empty() && self.event_name.is_empty() && !self.show_all
    }

    /// Which of the four store query shapes serves these criteria.
    pub fn query(&self) -> Query {
        let name = self.assigned_name.trim();
        let event = self.event_name.trim();

        match (name.is_empty(), event.is_empty()) {
            (false, false) => Query::ByAssigneeAndEvent {
                assigned: name.to_string(),
                event: event.to_string(),
            },
            (false, true) => Query::ByAssignee {
                assigned: name.to_string(),
            },
            (true, false) => Query::ByEvent {
                event: event.to_string(),
            },
            (true, true) => Query::All,
        }
    }

    /// Second pass over whatever the store returned.
    ///
    /// The store already filtered by assignee; this repeats it as a
    /// case-insensitive substring match so a store that ignores or loosens
    /// the filter still cannot widen the visible list. Inactive records are
    /// dropped unless `show_all` is set.
    pub fn apply_local(&self, records: &[ScheduleRecord]) -> Vec<ScheduleRecord> {
        let needle = self.assigned_name.trim().to_lowercase();

        records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .filter(|r| self.show_all || r.is_active)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::tests::record;

    #[test]
    fn query_shape_follows_populated_fields() {
        assert_eq!(FilterCriteria::default().query(), Query::All);
        assert_eq!(
            FilterCriteria::new("John", "").query(),
            Query::ByAssignee { assigned: "John".into() }
        );
        assert_eq!(
            FilterCriteria::new("", "GLC").query(),
            Query::ByEvent { event: "GLC".into() }
        );
        assert_eq!(
            FilterCriteria::new("John", "GLC").query(),
            Query::ByAssigneeAndEvent { assigned: "John".into(), event: "GLC".into() }
        );
    }

    #[test]
    fn whitespace_only_fields_are_unconstrained() {
        assert_eq!(FilterCriteria::new("  ", " ").query(), Query::All);
    }

    #[test]
    fn local_pass_is_case_insensitive_substring() {
        let records = vec![
            record(1, "John", "GLC", "2025-08-03"),
            record(2, "Amy", "SUNDAY", "2025-08-10"),
            record(3, "Johnny", "B1G", "2025-08-17"),
        ];
        let kept = FilterCriteria::new("joh", "").apply_local(&records);
        let ids: Vec<_> = kept.iter().map(|r| r.schedule_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn inactive_records_need_show_all() {
        let mut inactive = record(2, "Amy", "SUNDAY", "2025-08-10");
        inactive.is_active = false;
        let records = vec![record(1, "John", "GLC", "2025-08-03"), inactive];

        assert_eq!(FilterCriteria::default().apply_local(&records).len(), 1);

        let all = FilterCriteria { show_all: true, ..Default::default() };
        assert_eq!(all.apply_local(&records).len(), 2);
    }
}
