//! Entry store abstraction.
//!
//! Every backend exposes the same small capability set (insert, query by
//! date, delete by id) plus the exports log. The backend is picked from the
//! configuration by [`open_store`].

mod csv_store;
mod memory;
mod sqlite;

pub use csv_store::CsvStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::models::{ExportRecord, TimeEntry};
use chrono::NaiveDate;

pub trait EntryStore {
    /// Insert entries, returning how many were stored.
    fn insert(&mut self, entries: &[TimeEntry]) -> AppResult<usize>;

    /// Entries for `date` (optionally one job), in insertion order.
    fn query(&mut self, date: NaiveDate, job_number: Option<&str>) -> AppResult<Vec<TimeEntry>>;

    /// Delete entries by id, returning how many were removed.
    fn delete(&mut self, ids: &[i64]) -> AppResult<usize>;

    fn record_export(&mut self, record: &ExportRecord) -> AppResult<()>;

    /// Exports log, oldest first, optionally restricted to one export date.
    fn export_history(&mut self, date: Option<NaiveDate>) -> AppResult<Vec<ExportRecord>>;
}

/// Open the store selected by `cfg.backend`.
pub fn open_store(cfg: &Config) -> AppResult<Box<dyn EntryStore>> {
    match cfg.backend {
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&cfg.database)?)),
        Backend::Csv => Ok(Box::new(CsvStore::open(&cfg.csv_store)?)),
    }
}

/// Job filter shared by the file-based stores: exact match after trimming.
pub(crate) fn job_matches(entry_job: &str, wanted: Option<&str>) -> bool {
    match wanted {
        Some(job) => entry_job.trim() == job.trim(),
        None => true,
    }
}
