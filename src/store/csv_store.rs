use super::{EntryStore, job_matches};
use crate::errors::{AppError, AppResult};
use crate::models::{ExportRecord, TimeEntry};
use crate::ui::messages::warning;
use crate::utils::fields::{parse_hours, parse_optional_hours};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Writer};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Column layout of the flat "Time Data" file.
const TIME_DATA_HEADERS: [&str; 17] = [
    "Id",
    "Job Number",
    "Job Area",
    "Date",
    "Name",
    "Class Type",
    "Trade Class",
    "Employee Number",
    "Time Record Type",
    "RT Hours",
    "OT Hours",
    "Hours",
    "Night Shift",
    "Premium Rate / Subsistence Rate / Travel Rate",
    "Comments",
    "Created By",
    "Created At",
];

/// Entry store backed by a single CSV file, rewritten on every change.
///
/// The file may come from a spreadsheet export: missing optional columns read
/// as empty, malformed hours read as `0.0` and rows with an unparseable date
/// are left out of queries. Rewrites keep those rows and any extra columns
/// exactly as they were found.
pub struct CsvStore {
    path: PathBuf,
    log_path: PathBuf,
}

/// One line of the file as read.
enum Row {
    Entry {
        entry: TimeEntry,
        /// Values of the extra columns, in [`Sheet::extra_headers`] order.
        extra: Vec<String>,
    },
    /// Date could not be parsed: every cell in output column order.
    Unparsed(Vec<String>),
}

#[derive(Default)]
struct Sheet {
    /// Columns not in [`TIME_DATA_HEADERS`], in file order.
    extra_headers: Vec<String>,
    rows: Vec<Row>,
}

impl Sheet {
    fn entries(&self) -> impl Iterator<Item = &TimeEntry> {
        self.rows.iter().filter_map(|r| match r {
            Row::Entry { entry, .. } => Some(entry),
            Row::Unparsed(_) => None,
        })
    }

    /// Ids found in unparsed rows stay reserved.
    fn next_id(&self) -> i64 {
        self.rows
            .iter()
            .map(|r| match r {
                Row::Entry { entry, .. } => entry.id,
                Row::Unparsed(cells) => cells
                    .first()
                    .and_then(|id| id.trim().parse().ok())
                    .unwrap_or(0),
            })
            .max()
            .unwrap_or(0)
            + 1
    }

    fn push_entry(&mut self, entry: TimeEntry) {
        let extra = vec![String::new(); self.extra_headers.len()];
        self.rows.push(Row::Entry { entry, extra });
    }
}

impl CsvStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let store = Self {
            log_path: exports_log_path(&path),
            path,
        };

        if !store.path.exists() {
            store.write_sheet(&Sheet::default())?;
        }

        Ok(store)
    }

    fn read_sheet(&self) -> AppResult<Sheet> {
        let mut rdr = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)?;

        let headers = rdr.headers()?.clone();
        let extra_headers: Vec<String> = headers
            .iter()
            .filter(|h| !h.is_empty() && !TIME_DATA_HEADERS.contains(h))
            .map(str::to_string)
            .collect();

        let mut sheet = Sheet {
            extra_headers,
            rows: Vec::new(),
        };
        let mut missing_ids = Vec::new();

        for (idx, rec) in rdr.records().enumerate() {
            let rec = rec?;
            let field = |name: &str| cell(&headers, &rec, name);
            let extra: Vec<String> = sheet.extra_headers.iter().map(|h| field(h.as_str())).collect();

            let raw_date = field("Date");
            let Some(date) = parse_cell_date(&raw_date) else {
                warning(format!(
                    "Skipping row {} of {}: invalid date '{}'",
                    idx + 2,
                    self.path.display(),
                    raw_date
                ));
                let mut cells: Vec<String> = TIME_DATA_HEADERS.iter().map(|h| field(*h)).collect();
                cells.extend(extra);
                sheet.rows.push(Row::Unparsed(cells));
                continue;
            };

            let mut e = TimeEntry::new(date);
            e.id = field("Id").trim().parse().unwrap_or(0);
            e.job_number = field("Job Number");
            e.job_area = field("Job Area");
            e.employee_name = field("Name");
            e.class_type = field("Class Type");
            e.trade_class = field("Trade Class");
            e.employee_number = field("Employee Number");
            e.time_record_type = field("Time Record Type");
            e.rt_hours = parse_hours(&field("RT Hours"));
            e.ot_hours = parse_hours(&field("OT Hours"));
            e.total_hours = parse_optional_hours(&field("Hours"));
            e.night_shift = field("Night Shift");
            e.premium_code = field("Premium Rate / Subsistence Rate / Travel Rate");
            e.comments = field("Comments");
            e.created_by = field("Created By");
            e.created_at = field("Created At");

            if e.id <= 0 {
                missing_ids.push(sheet.rows.len());
            }
            sheet.rows.push(Row::Entry {
                entry: e.normalized(),
                extra,
            });
        }

        // rows written by hand carry no id: number them after the known ones
        let mut next = sheet.next_id();
        for i in missing_ids {
            if let Row::Entry { entry, .. } = &mut sheet.rows[i] {
                entry.id = next;
                next += 1;
            }
        }

        Ok(sheet)
    }

    fn write_sheet(&self, sheet: &Sheet) -> AppResult<()> {
        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut wtr = Writer::from_path(&tmp)?;
            let header: Vec<&str> = TIME_DATA_HEADERS
                .iter()
                .copied()
                .chain(sheet.extra_headers.iter().map(String::as_str))
                .collect();
            wtr.write_record(&header)?;

            for row in &sheet.rows {
                match row {
                    Row::Entry { entry, extra } => {
                        let mut cells = entry_to_record(entry);
                        cells.extend(extra.iter().cloned());
                        wtr.write_record(&cells)?;
                    }
                    Row::Unparsed(cells) => wtr.write_record(cells)?,
                }
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl EntryStore for CsvStore {
    fn insert(&mut self, entries: &[TimeEntry]) -> AppResult<usize> {
        if entries.is_empty() {
            return Ok(0);
        }

        let mut sheet = self.read_sheet()?;
        let mut next = sheet.next_id();

        for e in entries {
            let mut stored = e.normalized();
            stored.id = next;
            next += 1;
            sheet.push_entry(stored);
        }

        self.write_sheet(&sheet)?;
        Ok(entries.len())
    }

    fn query(&mut self, date: NaiveDate, job_number: Option<&str>) -> AppResult<Vec<TimeEntry>> {
        Ok(self
            .read_sheet()?
            .entries()
            .filter(|e| e.date == date && job_matches(&e.job_number, job_number))
            .cloned()
            .collect())
    }

    fn delete(&mut self, ids: &[i64]) -> AppResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut sheet = self.read_sheet()?;
        let before = sheet.rows.len();
        sheet.rows.retain(|r| match r {
            Row::Entry { entry, .. } => !ids.contains(&entry.id),
            Row::Unparsed(_) => true,
        });
        let removed = before - sheet.rows.len();

        if removed > 0 {
            self.write_sheet(&sheet)?;
        }
        Ok(removed)
    }

    fn record_export(&mut self, record: &ExportRecord) -> AppResult<()> {
        let needs_header = !self.log_path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        wtr.serialize(record)?;
        wtr.flush()?;
        Ok(())
    }

    fn export_history(&mut self, date: Option<NaiveDate>) -> AppResult<Vec<ExportRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let wanted = date.map(|d| d.format("%Y-%m-%d").to_string());
        let mut rdr = csv::Reader::from_path(&self.log_path)?;
        let mut out = Vec::new();

        for rec in rdr.deserialize::<ExportRecord>() {
            let rec = rec.map_err(|e| {
                AppError::Other(format!("corrupt exports log {}: {e}", self.log_path.display()))
            })?;
            if wanted.as_deref().is_none_or(|d| rec.date == d) {
                out.push(rec);
            }
        }
        Ok(out)
    }
}

/// `time_data.csv` → `time_data_exports_log.csv`
fn exports_log_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "time_data".to_string());
    path.with_file_name(format!("{stem}_exports_log.csv"))
}

fn cell(headers: &StringRecord, rec: &StringRecord, name: &str) -> String {
    headers
        .iter()
        .position(|h| h == name)
        .and_then(|i| rec.get(i))
        .unwrap_or("")
        .to_string()
}

/// Dates may carry a time part when the file went through a spreadsheet.
fn parse_cell_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn entry_to_record(e: &TimeEntry) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.job_number.clone(),
        e.job_area.clone(),
        e.date.format("%Y-%m-%d").to_string(),
        e.employee_name.clone(),
        e.class_type.clone(),
        e.trade_class.clone(),
        e.employee_number.clone(),
        e.time_record_type.clone(),
        e.rt_hours.to_string(),
        e.ot_hours.to_string(),
        e.total_hours.map(|h| h.to_string()).unwrap_or_default(),
        e.night_shift.clone(),
        e.premium_code.clone(),
        e.comments.clone(),
        e.created_by.clone(),
        e.created_at.clone(),
    ]
}
