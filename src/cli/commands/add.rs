use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::TimeEntry;
use crate::store::open_store;
use crate::ui::messages::{success, warning};
use crate::utils::date;

fn check_hours(label: &str, value: f64) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidEntry(format!(
            "{label} hours must be a non-negative number (got {value})"
        )));
    }
    Ok(())
}

/// Job numbers end up in export file names.
fn check_job_number(job: &str) -> AppResult<()> {
    if job.contains(['/', '\\']) {
        return Err(AppError::InvalidEntry(format!(
            "job number '{job}' must not contain '/' or '\\'"
        )));
    }
    Ok(())
}

/// Build one entry per employee. Person numbers and trades pair up with
/// the employee at the same position; missing ones stay blank.
fn build_entries(
    template: &TimeEntry,
    employees: &[String],
    emp_numbers: &[String],
    trades: &[String],
) -> Vec<TimeEntry> {
    employees
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut e = template.clone();
            e.employee_name = name.clone();
            e.employee_number = emp_numbers.get(i).cloned().unwrap_or_default();
            e.trade_class = trades.get(i).cloned().unwrap_or_default();
            e.normalized()
        })
        .collect()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        job,
        area,
        code,
        employees,
        emp_numbers,
        trades,
        rt,
        ot,
        total,
        night_shift,
        premium,
        record_type,
        comments,
        by,
    } = cmd
    {
        let d = date::require_date(date_str)?;
        check_job_number(job)?;

        check_hours("RT", *rt)?;
        check_hours("OT", *ot)?;
        if let Some(t) = total {
            check_hours("Total", *t)?;
        }

        if emp_numbers.len() > employees.len() || trades.len() > employees.len() {
            return Err(AppError::InvalidEntry(
                "more --emp-no/--trade values than --employee values".into(),
            ));
        }

        let mut template = TimeEntry::new(d);
        template.job_number = job.clone();
        template.job_area = area.clone();
        template.class_type = code.clone();
        template.rt_hours = *rt;
        template.ot_hours = *ot;
        template.total_hours = *total;
        template.night_shift = night_shift.clone().unwrap_or_default();
        template.premium_code = premium.clone().unwrap_or_default();
        template.time_record_type = record_type.clone().unwrap_or_default();
        template.comments = comments.clone().unwrap_or_default();
        template.created_by = by.clone().unwrap_or_default();
        template.created_at = chrono::Local::now().to_rfc3339();

        let entries = build_entries(&template, employees, emp_numbers, trades);

        for e in &entries {
            if let Some(field) = e.missing_required() {
                return Err(AppError::InvalidEntry(format!(
                    "missing {field} for employee '{}'",
                    e.employee_name
                )));
            }
        }

        if *rt == 0.0 && *ot == 0.0 && total.is_none_or(|t| t == 0.0) {
            warning("No hours given: only subsistence (if any) will be exported.");
        }

        let mut store = open_store(cfg)?;
        let inserted = store.insert(&entries)?;

        success(format!(
            "Added {} entr{} for job {} on {}.",
            inserted,
            if inserted == 1 { "y" } else { "ies" },
            job.trim(),
            d
        ));
    }

    Ok(())
}
