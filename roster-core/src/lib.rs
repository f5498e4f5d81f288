//! Core of roster: schedule records, the hosted store, and the view-state
//! coordination behind the schedule screen.
//!
//! - [`record`], [`date`]: the data model and civil-date handling
//! - [`store`]: the remote store contract and its implementations
//! - [`mapper`], [`filter`], [`sort`], [`calendar`]: pure derivations for display
//! - [`forms`], [`view`], [`modal`], [`bus`]: dialogs and how they report back
//! - [`shell`]: the coordinator tying fetches, filters, sorting and dialogs together

pub mod bus;
pub mod calendar;
pub mod choices;
pub mod config;
pub mod date;
pub mod error;
pub mod filter;
pub mod forms;
pub mod mapper;
pub mod modal;
pub mod record;
pub mod shell;
pub mod sort;
pub mod store;
pub mod view;

pub use error::{RosterError, RosterResult};
pub use record::{ScheduleColumn, ScheduleFields, ScheduleId, ScheduleRecord};
pub use shell::{FetchOutcome, FetchTicket, Shell};
