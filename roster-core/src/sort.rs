//! Column sorting for the schedule table.

use crate::record::{ScheduleColumn, ScheduleRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Active sort column and direction. Starts unsorted; never resets on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    column: Option<ScheduleColumn>,
    direction: SortDirection,
}

impl SortState {
    pub fn column(&self) -> Option<ScheduleColumn> {
        self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header click: the active column flips direction, any other column
    /// becomes active in ascending order.
    pub fn toggle(&mut self, column: ScheduleColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Direction indicator for `column`'s header, if it is the active one.
    pub fn indicator(&self, column: ScheduleColumn) -> Option<&'static str> {
        (self.column == Some(column)).then(|| self.direction.arrow())
    }

    /// Stable sort; with no active column the input order is kept.
    pub fn apply(&self, records: &mut [ScheduleRecord]) {
        let Some(column) = self.column else {
            return;
        };

        records.sort_by(|a, b| {
            let ord = column.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
}
