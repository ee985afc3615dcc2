//! Result sinks
//!
//! A sink receives every report a comparator produces. Implementations must
//! only ever add; earlier reports are never rewritten.

use crate::report::AccuracyReport;
use fieldscore_core::Result;
use parking_lot::Mutex;

/// Destination for accuracy reports
pub trait ResultSink: Send + Sync {
    /// Append one report
    fn append(&self, report: &AccuracyReport) -> Result<()>;
}

/// In-memory sink, mostly useful for tests and dry runs
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<AccuracyReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports appended so far
    pub fn reports(&self) -> Vec<AccuracyReport> {
        self.reports.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }
}

impl ResultSink for MemorySink {
    fn append(&self, report: &AccuracyReport) -> Result<()> {
        self.reports.lock().push(report.clone());
        Ok(())
    }
}
