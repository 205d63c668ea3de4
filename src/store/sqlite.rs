use super::EntryStore;
use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_entries, insert_entry, insert_export_record, load_entries_by_date, load_export_records,
};
use crate::errors::{AppError, AppResult};
use crate::models::{ExportRecord, TimeEntry};
use chrono::NaiveDate;

/// Entry store backed by a local SQLite database.
pub struct SqliteStore {
    pool: DbPool,
}

fn migrate(pool: &DbPool) -> AppResult<()> {
    run_pending_migrations(&pool.conn).map_err(|e| AppError::Migration(e.to_string()))
}

impl SqliteStore {
    /// Open (or create) the database and bring the schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        migrate(&pool)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        migrate(&pool)?;
        Ok(Self { pool })
    }

    pub fn pool(&mut self) -> &mut DbPool {
        &mut self.pool
    }
}

impl EntryStore for SqliteStore {
    fn insert(&mut self, entries: &[TimeEntry]) -> AppResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let tx = self.pool.conn.transaction()?;
        let mut inserted = 0;
        for e in entries {
            insert_entry(&tx, &e.normalized())?;
            inserted += 1;
        }

        let first = &entries[0];
        ttlog(
            &tx,
            "add",
            first.date.format("%Y-%m-%d").to_string().as_str(),
            &format!("Inserted {} entr(y/ies) for job {}", inserted, first.job_number.trim()),
        )?;
        tx.commit()?;

        Ok(inserted)
    }

    fn query(&mut self, date: NaiveDate, job_number: Option<&str>) -> AppResult<Vec<TimeEntry>> {
        load_entries_by_date(&self.pool.conn, &date, job_number)
    }

    fn delete(&mut self, ids: &[i64]) -> AppResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.pool.conn.transaction()?;
        let removed = delete_entries(&tx, ids)?;
        let id_list = ids
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        ttlog(
            &tx,
            "del",
            &id_list,
            &format!("Deleted {removed} entr(y/ies)"),
        )?;
        tx.commit()?;

        Ok(removed)
    }

    fn record_export(&mut self, record: &ExportRecord) -> AppResult<()> {
        insert_export_record(&self.pool.conn, record)?;
        ttlog(
            &self.pool.conn,
            "export",
            &record.file_name,
            &format!("{} ({} line(s))", record.status.as_str(), record.entries_count),
        )
    }

    fn export_history(&mut self, date: Option<NaiveDate>) -> AppResult<Vec<ExportRecord>> {
        load_export_records(&self.pool.conn, date.as_ref())
    }
}
