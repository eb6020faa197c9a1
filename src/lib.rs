//! SmartRoster: monthly shift rosters with fair, deterministic assignment.
//!
//! The `schedule` module holds the assignment engine; `parser` reads the
//! free-text roster, weekly plan and holiday inputs; `form` holds the web
//! request model and the daily roster export; `web` serves the form.

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{RosterError, RosterResult};
