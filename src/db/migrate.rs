use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `time_entries` table with the current schema.
fn create_time_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            date             TEXT NOT NULL,
            job_number       TEXT NOT NULL,
            job_area         TEXT NOT NULL DEFAULT '',
            employee_name    TEXT NOT NULL,
            employee_number  TEXT NOT NULL DEFAULT '',
            trade_class      TEXT NOT NULL DEFAULT '',
            time_record_type TEXT NOT NULL DEFAULT '',
            class_type       TEXT NOT NULL DEFAULT '',
            rt_hours         REAL NOT NULL DEFAULT 0,
            ot_hours         REAL NOT NULL DEFAULT 0,
            total_hours      REAL,
            night_shift      TEXT NOT NULL DEFAULT '',
            premium_code     TEXT NOT NULL DEFAULT '',
            comments         TEXT NOT NULL DEFAULT '',
            created_by       TEXT NOT NULL DEFAULT '',
            created_at       TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_time_entries_date_job ON time_entries(date, job_number);
        "#,
    )?;
    Ok(())
}

fn create_exports_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS exports_log (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            log_id         TEXT NOT NULL,
            date           TEXT NOT NULL,
            job_number     TEXT NOT NULL DEFAULT '',
            entries_count  INTEGER NOT NULL DEFAULT 0,
            file_name      TEXT NOT NULL,
            delivery_path  TEXT NOT NULL DEFAULT '',
            link           TEXT NOT NULL DEFAULT '',
            triggered_by   TEXT NOT NULL DEFAULT '',
            triggered_at   TEXT NOT NULL,
            status         TEXT NOT NULL CHECK(status IN ('Created','Failed')),
            notes          TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_exports_log_date ON exports_log(date);
        "#,
    )?;
    Ok(())
}

/// Early databases stored only the pre-split RT/OT values.
fn migrate_add_total_hours_column(conn: &Connection) -> Result<()> {
    let version = "20250920_0002_add_total_hours";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !has_column(conn, "time_entries", "total_hours")? {
        conn.execute("ALTER TABLE time_entries ADD COLUMN total_hours REAL;", [])?;
        success(format!(
            "Migration applied: {} → added 'total_hours' to time_entries table",
            version
        ));
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added total_hours to time_entries')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a `SqliteStore` is opened.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "time_entries")? {
        create_time_entries_table(conn)?;
        success("Created time_entries table.");
    }
    migrate_add_total_hours_column(conn)?;

    if !table_exists(conn, "exports_log")? {
        create_exports_log_table(conn)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert!(table_exists(&conn, "time_entries").unwrap());
        assert!(table_exists(&conn, "exports_log").unwrap());
        assert!(has_column(&conn, "time_entries", "total_hours").unwrap());

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn legacy_table_gains_total_hours() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE time_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                job_number TEXT NOT NULL,
                job_area TEXT NOT NULL DEFAULT '',
                employee_name TEXT NOT NULL,
                employee_number TEXT NOT NULL DEFAULT '',
                trade_class TEXT NOT NULL DEFAULT '',
                time_record_type TEXT NOT NULL DEFAULT '',
                class_type TEXT NOT NULL DEFAULT '',
                rt_hours REAL NOT NULL DEFAULT 0,
                ot_hours REAL NOT NULL DEFAULT 0,
                night_shift TEXT NOT NULL DEFAULT '',
                premium_code TEXT NOT NULL DEFAULT '',
                comments TEXT NOT NULL DEFAULT '',
                created_by TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();
        assert!(has_column(&conn, "time_entries", "total_hours").unwrap());
    }
}
