use crate::cli::parser::Commands;
use crate::config::{Backend, Config};
use crate::db::log::{LogLine, load_log};
use crate::errors::{AppError, AppResult};
use crate::models::{ExportRecord, ExportStatus};
use crate::store::{SqliteStore, open_store};
use crate::ui::messages::{header, warning};
use crate::utils::date;
use crate::utils::table::Table;
use ansi_term::Colour;
use regex::Regex;

const OP_WIDTH: usize = 60;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        date: date_str,
        internal,
    } = cmd
    {
        if *internal {
            if cfg.backend != Backend::Sqlite {
                warning("The internal log is only kept by the sqlite backend.");
                return Ok(());
            }
            let mut store = SqliteStore::open(&cfg.database)?;
            let lines = load_log(&store.pool().conn)?;
            print_internal_log(&lines)?;
            return Ok(());
        }

        let filter = date_str.as_deref().map(date::require_date).transpose()?;
        let mut store = open_store(cfg)?;
        let history = store.export_history(filter)?;

        if history.is_empty() {
            println!("No exports recorded.");
            return Ok(());
        }

        header("Exports log");
        print!("{}", exports_table(&history).render());
    }

    Ok(())
}

fn exports_table(history: &[ExportRecord]) -> Table {
    let mut table = Table::new([
        "Date", "Job", "File", "Lines", "Status", "By", "At", "Link / Notes",
    ]);

    for r in history {
        let tail = match r.status {
            ExportStatus::Created => r.link.clone(),
            _ => r.notes.clone(),
        };
        table.add_row(vec![
            r.date.clone(),
            if r.job_number.is_empty() { "ALL".into() } else { r.job_number.clone() },
            r.file_name.clone(),
            r.entries_count.to_string(),
            r.status.as_str().to_string(),
            r.triggered_by.clone(),
            r.triggered_at.clone(),
            tail,
        ]);
    }

    table
}

// ---------------------------
// Internal log
// ---------------------------

fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// `operation (target)`, cut to [`OP_WIDTH`] visible chars, operation coloured.
fn op_cell(re: &Regex, line: &LogLine) -> String {
    let color = color_for_operation(&line.operation);
    let plain = if line.target.is_empty() {
        line.operation.clone()
    } else {
        format!("{} ({})", line.operation, line.target)
    };

    let visible = if plain.chars().count() > OP_WIDTH {
        let mut s: String = plain.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    let pad = OP_WIDTH.saturating_sub(strip_ansi(re, &colored).chars().count());
    format!("{colored}{}", " ".repeat(pad))
}

fn print_internal_log(lines: &[LogLine]) -> AppResult<()> {
    let re = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

    let id_w = lines
        .iter()
        .map(|l| l.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = lines.iter().map(|l| l.date.len()).max().unwrap_or(10);

    println!("📜 Internal log:\n");

    for l in lines {
        println!(
            "{:>id_w$}: {:<date_w$} | {} => {}",
            l.id,
            l.date,
            op_cell(&re, l),
            l.message,
            id_w = id_w,
            date_w = date_w
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(op: &str, target: &str) -> LogLine {
        LogLine {
            id: 1,
            date: "2025-09-19T10:00:00+00:00".into(),
            operation: op.into(),
            target: target.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn op_cell_pads_on_visible_width() {
        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
        let cell = op_cell(&re, &line("add", "2025-09-19"));

        let visible = strip_ansi(&re, &cell);
        assert_eq!(visible.chars().count(), OP_WIDTH);
        assert!(visible.starts_with("add (2025-09-19)"));
    }

    #[test]
    fn long_targets_are_truncated() {
        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
        let long = "x".repeat(100);
        let visible = strip_ansi(&re, &op_cell(&re, &line("export", &long)));

        assert_eq!(visible.chars().count(), OP_WIDTH);
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn whole_day_exports_show_all() {
        let rec = ExportRecord {
            log_id: "x".into(),
            date: "2025-09-19".into(),
            job_number: String::new(),
            entries_count: 3,
            file_name: "09-19-2025 - Daily Time.xlsx".into(),
            delivery_path: "September/09-19-2025 - Daily Time.xlsx".into(),
            link: "/tmp/out/September/09-19-2025 - Daily Time.xlsx".into(),
            triggered_by: "ops".into(),
            triggered_at: "2025-09-19T18:00:00+00:00".into(),
            status: ExportStatus::Created,
            notes: String::new(),
        };

        let out = exports_table(&[rec]).render();
        assert!(out.contains("ALL"));
        assert!(out.contains("Created"));
    }
}
