//! Scheduler export.
//!
//! Consumes a week manifest and emits a time-distributed posting schedule:
//! only `ok` entries participate, slot assignment is deterministic given
//! the same manifest and cadence policy, and every datetime is
//! timezone-aware.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cadence;
mod exporter;
mod writer;

pub use cadence::CadencePolicy;
pub use exporter::{ExportOutcome, export};
pub use writer::write_schedule_csv;
