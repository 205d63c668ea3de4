use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::split::effective_hours;
use crate::models::TimeEntry;
use crate::store::open_store;
use crate::ui::messages::header;
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        date: date_str,
        job,
        json,
    } = cmd
    {
        let d = date::date_or_today(date_str.as_ref())?;

        let mut store = open_store(cfg)?;
        let entries = store.query(d, job.as_deref())?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("No entries for {}", d);
            return Ok(());
        }

        header(format!("{} ({} entries)", d, entries.len()));
        print!("{}", entries_table(&entries, cfg.derive_split).render());
    }

    Ok(())
}

/// RT/OT columns show the hours that will be exported; a derived split is
/// marked with `*`.
fn entries_table(entries: &[TimeEntry], derive_split: bool) -> Table {
    let mut table = Table::new([
        "Id", "Job", "Area", "Code", "Employee", "Emp #", "Trade", "RT", "OT", "NS", "Premium",
    ]);

    for e in entries {
        let (rt, ot) = effective_hours(e, derive_split);
        let derived = (rt, ot) != (e.rt_hours, e.ot_hours);
        let mark = if derived { "*" } else { "" };

        table.add_row(vec![
            e.id.to_string(),
            e.job_number.clone(),
            e.job_area.clone(),
            e.class_type.clone(),
            e.employee_name.clone(),
            e.employee_number.clone(),
            e.trade_class.clone(),
            format!("{rt:.2}{mark}"),
            format!("{ot:.2}{mark}"),
            e.night_shift.clone(),
            e.premium_code.clone(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn derived_split_is_marked() {
        // Tuesday
        let mut e = TimeEntry::new(NaiveDate::from_ymd_opt(2025, 9, 16).unwrap());
        e.id = 1;
        e.total_hours = Some(10.0);

        let out = entries_table(&[e], true).render();
        assert!(out.contains("8.00*"));
        assert!(out.contains("2.00*"));
    }
}
