//! Output of computed results.
//!
//! The algorithms return plain data; this module turns it into records and
//! text:
//! - [`record`] - One structured [`BlockRecord`] per computed block
//! - [`sink`] - The [`RecordSink`] trait and helpers to feed it
//! - [`log_file`] - Append-only result log
//! - [`terminal`] - Colored terminal output
//! - [`csv`] / [`json`] - Machine readable output

mod csv;
mod json;
mod log_file;
mod record;
mod sink;
mod terminal;

pub use csv::render_csv;
pub use json::render_json;
pub use log_file::LogFileSink;
pub use record::{
    allocation_records, allocation_title, summary_record, BlockRecord, FLSM_TITLE,
    SUMMARY_TITLE, VLSM_TITLE,
};
pub use sink::{emit_allocation, emit_error, emit_summary, MemorySink, RecordSink};
pub use terminal::{format_field, render_allocation, render_summary};
