use super::{EntryStore, job_matches};
use crate::errors::AppResult;
use crate::models::{ExportRecord, TimeEntry};
use chrono::NaiveDate;

/// Volatile store, handy for tests and for embedding the export pipeline.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<TimeEntry>,
    exports: Vec<ExportRecord>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EntryStore for MemoryStore {
    fn insert(&mut self, entries: &[TimeEntry]) -> AppResult<usize> {
        for e in entries {
            self.next_id += 1;
            let mut stored = e.normalized();
            stored.id = self.next_id;
            self.entries.push(stored);
        }
        Ok(entries.len())
    }

    fn query(&mut self, date: NaiveDate, job_number: Option<&str>) -> AppResult<Vec<TimeEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.date == date && job_matches(&e.job_number, job_number))
            .cloned()
            .collect())
    }

    fn delete(&mut self, ids: &[i64]) -> AppResult<usize> {
        let before = self.entries.len();
        self.entries.retain(|e| !ids.contains(&e.id));
        Ok(before - self.entries.len())
    }

    fn record_export(&mut self, record: &ExportRecord) -> AppResult<()> {
        self.exports.push(record.clone());
        Ok(())
    }

    fn export_history(&mut self, date: Option<NaiveDate>) -> AppResult<Vec<ExportRecord>> {
        let wanted = date.map(|d| d.format("%Y-%m-%d").to_string());
        Ok(self
            .exports
            .iter()
            .filter(|r| wanted.as_deref().is_none_or(|d| r.date == d))
            .cloned()
            .collect())
    }
}
