// src/export/transform.rs
//
// Pure reshaping of stored entries into payroll import lines. Nothing here
// touches the store, the filesystem or the clock, so the same input always
// yields the same documents.

use crate::config::Config;
use crate::errors::AppResult;
use crate::export::model::{DaySummary, ExportLineItem, JobDescriptions, JobExport};
use crate::export::naming::{FilenameDate, NamingConfig};
use crate::export::split::effective_hours;
use crate::models::{PayCodeKind, PayCodeMap, TimeEntry};
use crate::utils::fields::{clean_blank, pad_job_area};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Per-run knobs of the transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub pay_codes: PayCodeMap,
    /// Emit a SUBSISTENCE line for entries whose premium code asks for it.
    pub subsistence: bool,
    /// Derive RT/OT from `total_hours` when no split was recorded.
    pub derive_split: bool,
    pub naming: NamingConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pay_codes: PayCodeMap::default(),
            subsistence: true,
            derive_split: true,
            naming: NamingConfig::default(),
        }
    }
}

impl ExportOptions {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            pay_codes: cfg.pay_codes.clone(),
            subsistence: cfg.subsistence,
            derive_split: cfg.derive_split,
            naming: NamingConfig {
                date_format: FilenameDate::parse(&cfg.filename_date_format)?,
                summary_separator: cfg.summary_separator.clone(),
            },
        })
    }
}

/// True when a premium code means "pay subsistence for this day".
pub fn has_subsistence(premium_code: &str) -> bool {
    let p = clean_blank(premium_code, true);
    p.contains("SUBSIST") || p.contains("261")
}

/// Expand one entry into its payroll lines: REG, then OT, then SUBSISTENCE.
/// An entry with nothing to pay yields no lines at all.
pub fn expand_entry(entry: &TimeEntry, opts: &ExportOptions) -> Vec<ExportLineItem> {
    let (rt, ot) = effective_hours(entry, opts.derive_split);
    let premium = clean_blank(&entry.premium_code, false);

    let base = ExportLineItem {
        date: entry.date.format("%Y-%m-%d").to_string(),
        time_record_type: clean_blank(&entry.time_record_type, false),
        person_number: clean_blank(&entry.employee_number, false),
        employee_name: clean_blank(&entry.employee_name, false),
        override_trade_class: clean_blank(&entry.trade_class, false),
        post_to_payroll: "Y".to_string(),
        cost_code: clean_blank(&entry.class_type, false),
        job_area: pad_job_area(&entry.job_area),
        scope_change: String::new(),
        kind: PayCodeKind::Reg,
        pay_code: String::new(),
        hours: 0.0,
        night_shift: clean_blank(&entry.night_shift, true),
        premium: premium.clone(),
        comments: clean_blank(&entry.comments, false),
    };

    let line = |kind: PayCodeKind, hours: f64| ExportLineItem {
        kind,
        pay_code: opts.pay_codes.code(kind).to_string(),
        hours,
        ..base.clone()
    };

    let mut out = Vec::with_capacity(3);
    if rt > 0.0 {
        out.push(line(PayCodeKind::Reg, rt));
    }
    if ot > 0.0 {
        out.push(line(PayCodeKind::Ot, ot));
    }
    if opts.subsistence && has_subsistence(&premium) {
        // a count of days, not a duration
        out.push(line(PayCodeKind::Subsistence, 1.0));
    }
    out
}

/// Group entries by trimmed job number, ascending. Entry order inside a
/// group is preserved.
fn group_by_job(entries: &[TimeEntry]) -> BTreeMap<String, Vec<&TimeEntry>> {
    let mut groups: BTreeMap<String, Vec<&TimeEntry>> = BTreeMap::new();
    for e in entries {
        groups
            .entry(e.job_number.trim().to_string())
            .or_default()
            .push(e);
    }
    groups
}

/// One `TimeEntries` document per job present on `date`.
///
/// Entries must already be filtered to `date`. Jobs whose entries produce no
/// lines are left out; an empty input gives an empty result.
pub fn build_job_exports(
    entries: &[TimeEntry],
    date: NaiveDate,
    opts: &ExportOptions,
) -> Vec<JobExport> {
    group_by_job(entries)
        .into_iter()
        .filter_map(|(job, group)| {
            let lines: Vec<ExportLineItem> = group
                .into_iter()
                .flat_map(|e| expand_entry(e, opts))
                .collect();

            if lines.is_empty() {
                return None;
            }

            Some(JobExport {
                file_name: opts.naming.job_file_name(date, &job),
                job_number: job,
                lines,
            })
        })
        .collect()
}

/// Every line of the day in one document, job by job.
pub fn build_day_summary(
    entries: &[TimeEntry],
    date: NaiveDate,
    opts: &ExportOptions,
) -> Option<DaySummary> {
    let lines: Vec<(String, ExportLineItem)> = build_job_exports(entries, date, opts)
        .into_iter()
        .flat_map(|job| {
            let number = job.job_number;
            job.lines.into_iter().map(move |l| (number.clone(), l))
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(DaySummary {
        file_name: opts.naming.summary_file_name(date),
        lines,
    })
}

/// Unique, non-empty work descriptions per job, first-seen order.
pub fn build_descriptions(
    entries: &[TimeEntry],
    date: NaiveDate,
    opts: &ExportOptions,
) -> Vec<JobDescriptions> {
    group_by_job(entries)
        .into_iter()
        .filter_map(|(job, group)| {
            let mut seen = HashSet::new();
            let descriptions: Vec<String> = group
                .into_iter()
                .map(|e| clean_blank(&e.comments, false))
                .filter(|d| !d.is_empty() && seen.insert(d.clone()))
                .collect();

            if descriptions.is_empty() {
                return None;
            }

            Some(JobDescriptions {
                file_name: opts.naming.description_file_name(date, &job),
                job_number: job,
                descriptions,
            })
        })
        .collect()
}
