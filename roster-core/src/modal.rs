//! Which dialog is open.

use crate::record::ScheduleId;

/// Sub-mode of the detail dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailMode {
    View,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Add,
    Filter,
    Detail {
        schedule_id: ScheduleId,
        mode: DetailMode,
    },
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    /// Opening the detail dialog always starts in view mode.
    pub fn open_detail(&mut self, schedule_id: ScheduleId) {
        *self = Modal::Detail {
            schedule_id,
            mode: DetailMode::View,
        };
    }

    /// Switch the detail dialog from view to edit. One-way: returns false
    /// when no detail dialog is open or it is already editing.
    pub fn enter_edit(&mut self) -> bool {
        match self {
            Modal::Detail { mode, .. } if *mode == DetailMode::View => {
                *mode = DetailMode::Edit;
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }
}
