//! Persistence of calculation history.
//!
//! - [`history`] - bounded, newest-first log stored as JSON

mod history;

pub use history::HistoryLog;
