use crate::errors::{AppError, AppResult};
use crate::models::{ExportRecord, ExportStatus, TimeEntry};
use crate::utils::fields::{coerce_hours, parse_hours};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, Result, Row, params, params_from_iter};

const ENTRY_COLUMNS: &str = "id, date, job_number, job_area, employee_name, employee_number, \
     trade_class, time_record_type, class_type, rt_hours, ot_hours, total_hours, \
     night_shift, premium_code, comments, created_by, created_at";

pub fn load_entries_by_date(
    conn: &Connection,
    date: &NaiveDate,
    job_number: Option<&str>,
) -> AppResult<Vec<TimeEntry>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut out = Vec::new();

    match job_number {
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE substr(date, 1, 10) = ?1
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map([&date_str], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(job) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE substr(date, 1, 10) = ?1 AND trim(job_number) = ?2
                 ORDER BY id ASC"
            ))?;
            let rows = stmt.query_map(params![date_str, job.trim()], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// Mapping DB → TimeEntry. Hours columns are coerced, never rejected.
pub fn map_row(row: &Row<'_>) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;
    let head = date_str.get(..10).unwrap_or(&date_str);

    let date = NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(TimeEntry {
        id: row.get("id")?,
        date,
        job_number: text(row, "job_number")?,
        job_area: text(row, "job_area")?,
        employee_name: text(row, "employee_name")?,
        employee_number: text(row, "employee_number")?,
        trade_class: text(row, "trade_class")?,
        time_record_type: text(row, "time_record_type")?,
        class_type: text(row, "class_type")?,
        rt_hours: hours(row.get("rt_hours")?).unwrap_or(0.0),
        ot_hours: hours(row.get("ot_hours")?).unwrap_or(0.0),
        total_hours: hours(row.get("total_hours")?),
        night_shift: text(row, "night_shift")?,
        premium_code: text(row, "premium_code")?,
        comments: text(row, "comments")?,
        created_by: text(row, "created_by")?,
        created_at: text(row, "created_at")?,
    })
}

/// Text column that may hold NULL or a number typed in by hand.
fn text(row: &Row<'_>, col: &str) -> Result<String> {
    Ok(match row.get::<_, Value>(col)? {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(_) => String::new(),
    })
}

fn hours(v: Value) -> Option<f64> {
    match v {
        Value::Null => None,
        Value::Integer(i) => Some(coerce_hours(i as f64)),
        Value::Real(f) => Some(coerce_hours(f)),
        Value::Text(s) => Some(parse_hours(&s)),
        Value::Blob(_) => Some(0.0),
    }
}

pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries (date, job_number, job_area, employee_name, employee_number,
             trade_class, time_record_type, class_type, rt_hours, ot_hours, total_hours,
             night_shift, premium_code, comments, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
        params![
            e.date.format("%Y-%m-%d").to_string(),
            e.job_number,
            e.job_area,
            e.employee_name,
            e.employee_number,
            e.trade_class,
            e.time_record_type,
            e.class_type,
            e.rt_hours,
            e.ot_hours,
            e.total_hours,
            e.night_shift,
            e.premium_code,
            e.comments,
            e.created_by,
            e.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_entries(conn: &Connection, ids: &[i64]) -> AppResult<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("DELETE FROM time_entries WHERE id IN ({placeholders})");
    let n = conn.execute(&sql, params_from_iter(ids.iter()))?;
    Ok(n)
}

pub fn insert_export_record(conn: &Connection, r: &ExportRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO exports_log (log_id, date, job_number, entries_count, file_name,
             delivery_path, link, triggered_by, triggered_at, status, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            r.log_id,
            r.date,
            r.job_number,
            r.entries_count as i64,
            r.file_name,
            r.delivery_path,
            r.link,
            r.triggered_by,
            r.triggered_at,
            r.status.as_str(),
            r.notes,
        ],
    )?;
    Ok(())
}

pub fn load_export_records(
    conn: &Connection,
    date: Option<&NaiveDate>,
) -> AppResult<Vec<ExportRecord>> {
    let base = "SELECT log_id, date, job_number, entries_count, file_name, delivery_path,
                       link, triggered_by, triggered_at, status, notes
                FROM exports_log";

    let mut out = Vec::new();
    match date {
        None => {
            let mut stmt = conn.prepare(&format!("{base} ORDER BY id ASC"))?;
            let rows = stmt.query_map([], map_export_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(d) => {
            let mut stmt = conn.prepare(&format!("{base} WHERE date = ?1 ORDER BY id ASC"))?;
            let rows = stmt.query_map([d.format("%Y-%m-%d").to_string()], map_export_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }
    Ok(out)
}

fn map_export_row(row: &Row<'_>) -> Result<ExportRecord> {
    let status_str: String = row.get(9)?;
    let status = ExportStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            9,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid export status: {status_str}"))),
        )
    })?;

    Ok(ExportRecord {
        log_id: row.get(0)?,
        date: row.get(1)?,
        job_number: row.get(2)?,
        entries_count: row.get::<_, i64>(3)?.max(0) as usize,
        file_name: row.get(4)?,
        delivery_path: row.get(5)?,
        link: row.get(6)?,
        triggered_by: row.get(7)?,
        triggered_at: row.get(8)?,
        status,
        notes: row.get(10)?,
    })
}
