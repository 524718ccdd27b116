//! Append-only plain text result log.

use super::record::BlockRecord;
use super::sink::RecordSink;
use crate::error::SubnetError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const LOG_HEADER: &str = "Subnet Calculator Log\n====================\n";

/// Appends sessions of records to a text file, creating it with a header
/// the first time.
#[derive(Debug)]
pub struct LogFileSink {
    file: File,
}

impl LogFileSink {
    pub fn open(path: impl AsRef<Path>) -> io::Result<LogFileSink> {
        let path = path.as_ref();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() == 0 {
            log::info!("Creating result log {}", path.display());
            file.write_all(LOG_HEADER.as_bytes())?;
        }
        Ok(LogFileSink { file })
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

impl RecordSink for LogFileSink {
    fn begin_session(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.file, "\n--- {title} started at {} ---", timestamp())
    }

    fn record(&mut self, record: &BlockRecord) -> io::Result<()> {
        writeln!(self.file, "\n{}:", record.label)?;
        for (name, value) in record.fields() {
            writeln!(self.file, "  {name}: {value}")?;
        }
        if record.usable_range().is_none() {
            writeln!(self.file, "  No usable IPs in this subnet.")?;
        }
        Ok(())
    }

    fn error(&mut self, error: &SubnetError) -> io::Result<()> {
        writeln!(self.file, "Error: {error}")
    }

    fn end_session(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.file, "--- {title} ended at {} ---", timestamp())?;
        self.file.flush()
    }
}
