use fieldscore_core::{Error, Result};
use fieldscore_similarity::{AccuracyReport, ResultSink};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "Results.csv";

/// Append-only report log
///
/// A single-column CSV file: every row holds one serialized report. The file
/// is opened for each append and closed before the call returns.
pub struct ReportLog {
    path: PathBuf,
    // Serializes appends from this process; other processes are not excluded
    write_lock: Mutex<()>,
    sync: bool,
}

impl ReportLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
            sync: false,
        }
    }

    /// fdatasync after every append
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one report as a new row
    pub fn append(&self, report: &AccuracyReport) -> Result<()> {
        let row = report.to_json()?;

        let _guard = self.write_lock.lock();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&file);
        writer
            .write_record([row.as_str()])
            .map_err(|e| Error::Csv(e.to_string()))?;
        writer.flush()?;
        drop(writer);

        if self.sync {
            file.sync_data()?;
        }

        debug!(path = %self.path.display(), "Accuracy report appended");
        Ok(())
    }

    /// Read every report back, oldest first
    ///
    /// A missing file reads as empty. Rows that do not decode are skipped.
    pub fn read_reports(&self) -> Result<Vec<AccuracyReport>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| Error::Csv(e.to_string()))?;

        let mut reports = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| Error::Csv(e.to_string()))?;
            let Some(text) = record.get(0) else {
                continue;
            };
            match AccuracyReport::from_json(text) {
                Ok(report) => reports.push(report),
                Err(e) => warn!(row, error = %e, "Skipping undecodable report row"),
            }
        }
        Ok(reports)
    }
}

impl ResultSink for ReportLog {
    fn append(&self, report: &AccuracyReport) -> Result<()> {
        ReportLog::append(self, report)
    }
}
