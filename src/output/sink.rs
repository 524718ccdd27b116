//! Destinations for result records.

use super::record::{
    allocation_records, allocation_title, summary_record, BlockRecord, SUMMARY_TITLE,
};
use crate::error::SubnetError;
use crate::models::{AllocationResult, SummaryResult};
use std::io;

/// Receives one [`BlockRecord`] per computed block.
///
/// Records of one operation are framed by `begin_session`/`end_session`.
/// A failed operation sends one `error` inside the frame instead.
/// Implementations own their writer, so calls through `&mut self` are
/// serialized.
pub trait RecordSink {
    fn begin_session(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }

    fn record(&mut self, record: &BlockRecord) -> io::Result<()>;

    fn error(&mut self, _error: &SubnetError) -> io::Result<()> {
        Ok(())
    }

    fn end_session(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub sessions: Vec<String>,
    pub records: Vec<BlockRecord>,
    pub errors: Vec<SubnetError>,
}

impl RecordSink for MemorySink {
    fn begin_session(&mut self, title: &str) -> io::Result<()> {
        self.sessions.push(title.to_string());
        Ok(())
    }

    fn record(&mut self, record: &BlockRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn error(&mut self, error: &SubnetError) -> io::Result<()> {
        self.errors.push(error.clone());
        Ok(())
    }
}

/// Send every allocated subnet of `result` to `sink` as one session.
pub fn emit_allocation(result: &AllocationResult, sink: &mut dyn RecordSink) -> io::Result<()> {
    let title = allocation_title(result);
    sink.begin_session(title)?;
    for record in allocation_records(result) {
        sink.record(&record)?;
    }
    sink.end_session(title)
}

/// Send the summary block of `result` to `sink` as one session.
pub fn emit_summary(result: &SummaryResult, sink: &mut dyn RecordSink) -> io::Result<()> {
    sink.begin_session(SUMMARY_TITLE)?;
    sink.record(&summary_record(result))?;
    sink.end_session(SUMMARY_TITLE)
}

/// Record a failed operation titled `title` as one session.
pub fn emit_error(title: &str, error: &SubnetError, sink: &mut dyn RecordSink) -> io::Result<()> {
    sink.begin_session(title)?;
    sink.error(error)?;
    sink.end_session(title)
}
