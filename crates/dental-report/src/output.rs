//! Report output as a `;`-delimited CSV file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use dental_correlation::{CorrelationError, CorrelationResult, ReportRow, ReportSink};

/// [`ReportSink`] that serializes rows to `;`-delimited CSV.
pub struct CsvReportSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl CsvReportSink<File> {
    /// Creates (or truncates) the report file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> CorrelationResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            CorrelationError::Report(format!("cannot create {}: {e}", path.display()))
        })?;
        Ok(Self::from_writer(file))
    }
}

impl<W: io::Write> CsvReportSink<W> {
    /// Wraps an arbitrary writer.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().delimiter(b';').from_writer(writer),
        }
    }

    /// Flushes buffered rows to the underlying writer.
    pub fn flush(&mut self) -> CorrelationResult<()> {
        self.writer
            .flush()
            .map_err(|e| CorrelationError::Report(e.to_string()))
    }
}

impl<W: io::Write> ReportSink for CsvReportSink<W> {
    fn write_row(&mut self, row: &ReportRow) -> CorrelationResult<()> {
        self.writer
            .serialize(row)
            .map_err(|e| CorrelationError::Report(e.to_string()))
    }
}
