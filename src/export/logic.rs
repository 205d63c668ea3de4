// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::delivery::Delivery;
use crate::export::naming::delivery_path;
use crate::export::transform::{
    ExportOptions, build_day_summary, build_descriptions, build_job_exports,
};
use crate::export::xlsx::{render_day_summary, render_descriptions, render_job_document};
use crate::models::{ExportRecord, ExportStatus};
use crate::store::EntryStore;
use crate::ui::messages::{error, warning};
use chrono::{NaiveDate, Utc};

/// What kind of document a report line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    TimeImport,
    DaySummary,
    Descriptions,
}

impl DocumentKind {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::TimeImport => "TimeEntries",
            DocumentKind::DaySummary => "Daily Time",
            DocumentKind::Descriptions => "Description",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Delivered { link: String },
    Failed { error: String },
    /// Built and named but not delivered (`--dry-run`).
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    pub kind: DocumentKind,
    /// Empty for the whole-day summary.
    pub job_number: String,
    pub file_name: String,
    pub delivery_path: String,
    /// Line items (or descriptions) in the document.
    pub entries_count: usize,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub date: NaiveDate,
    pub documents: Vec<DocumentResult>,
}

impl ExportReport {
    pub fn delivered(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Delivered { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Failed { .. }))
            .count()
    }

    pub fn count(&self, kind: DocumentKind) -> usize {
        self.documents.iter().filter(|d| d.kind == kind).count()
    }
}

/// Result of an export run. `NoData` is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    NoData,
    Completed(ExportReport),
}

/// Request-scoped settings for one run.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub date: NaiveDate,
    pub options: ExportOptions,
    pub include_summary: bool,
    pub include_descriptions: bool,
    pub triggered_by: String,
    pub dry_run: bool,
}

struct BuiltDocument {
    kind: DocumentKind,
    job_number: String,
    file_name: String,
    entries_count: usize,
    bytes: AppResult<Vec<u8>>,
}

/// High-level export orchestration.
pub struct ExportLogic;

impl ExportLogic {
    /// Build every document for `req.date`, deliver each one independently
    /// and record each in the exports log.
    ///
    /// A document is rendered completely in memory before delivery; a failed
    /// render or upload only fails that document.
    pub fn run(
        store: &mut dyn EntryStore,
        delivery: &mut dyn Delivery,
        req: &ExportRequest,
    ) -> AppResult<ExportOutcome> {
        let entries = store.query(req.date, None)?;

        if entries.is_empty() {
            return Ok(ExportOutcome::NoData);
        }

        let opts = &req.options;
        let mut built = Vec::new();

        for job in build_job_exports(&entries, req.date, opts) {
            built.push(BuiltDocument {
                kind: DocumentKind::TimeImport,
                bytes: render_job_document(&job),
                entries_count: job.lines.len(),
                job_number: job.job_number,
                file_name: job.file_name,
            });
        }

        if req.include_summary
            && let Some(summary) = build_day_summary(&entries, req.date, opts)
        {
            built.push(BuiltDocument {
                kind: DocumentKind::DaySummary,
                bytes: render_day_summary(&summary),
                entries_count: summary.lines.len(),
                job_number: String::new(),
                file_name: summary.file_name,
            });
        }

        if req.include_descriptions {
            for doc in build_descriptions(&entries, req.date, opts) {
                built.push(BuiltDocument {
                    kind: DocumentKind::Descriptions,
                    bytes: render_descriptions(&doc),
                    entries_count: doc.descriptions.len(),
                    job_number: doc.job_number,
                    file_name: doc.file_name,
                });
            }
        }

        if built.is_empty() {
            warning(format!(
                "{} entr(y/ies) on {} but none carry hours or subsistence.",
                entries.len(),
                req.date
            ));
        }

        let triggered_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let mut documents = Vec::with_capacity(built.len());

        for doc in built {
            let path = delivery_path(req.date, &doc.file_name);

            let status = match doc.bytes {
                Err(e) => DocumentStatus::Failed {
                    error: e.to_string(),
                },
                Ok(_) if req.dry_run => DocumentStatus::Skipped,
                Ok(bytes) => match delivery.upload(&path, &bytes) {
                    Ok(link) => DocumentStatus::Delivered { link },
                    Err(e) => DocumentStatus::Failed {
                        error: e.to_string(),
                    },
                },
            };

            if let DocumentStatus::Failed { error: msg } = &status {
                error(format!("Export of '{}' failed: {}", doc.file_name, msg));
            }

            let result = DocumentResult {
                kind: doc.kind,
                job_number: doc.job_number,
                file_name: doc.file_name,
                delivery_path: path,
                entries_count: doc.entries_count,
                status,
            };

            // dry runs leave no trace in the exports log
            if let Some(record) = to_record(req, &result, &triggered_at)
                && let Err(e) = store.record_export(&record)
            {
                warning(format!(
                    "Could not write exports log for '{}': {}",
                    result.file_name, e
                ));
            }

            documents.push(result);
        }

        Ok(ExportOutcome::Completed(ExportReport {
            date: req.date,
            documents,
        }))
    }
}

/// Exports-log row for a delivered or failed document; `None` when skipped.
fn to_record(
    req: &ExportRequest,
    doc: &DocumentResult,
    triggered_at: &str,
) -> Option<ExportRecord> {
    let date = req.date.format("%Y-%m-%d").to_string();
    let job_tag = if doc.job_number.is_empty() {
        "ALL"
    } else {
        doc.job_number.as_str()
    };

    let (status, link, notes) = match &doc.status {
        DocumentStatus::Delivered { link } => (ExportStatus::Created, link.clone(), String::new()),
        DocumentStatus::Failed { error } => (ExportStatus::Failed, String::new(), error.clone()),
        DocumentStatus::Skipped => return None,
    };

    Some(ExportRecord {
        log_id: format!(
            "{}-{}-{}-{}",
            date,
            job_tag,
            doc.kind.label().replace(' ', ""),
            triggered_at
        ),
        date,
        job_number: doc.job_number.clone(),
        entries_count: doc.entries_count,
        file_name: doc.file_name.clone(),
        delivery_path: doc.delivery_path.clone(),
        link,
        triggered_by: req.triggered_by.clone(),
        triggered_at: triggered_at.to_string(),
        status,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::TimeEntry;
    use crate::store::MemoryStore;

    /// Records uploads; fails any path containing `fail_on`.
    #[derive(Default)]
    struct RecordingDelivery {
        uploads: Vec<(String, Vec<u8>)>,
        fail_on: Option<String>,
    }

    impl Delivery for RecordingDelivery {
        fn upload(&mut self, path: &str, bytes: &[u8]) -> AppResult<String> {
            if let Some(f) = &self.fail_on
                && path.contains(f.as_str())
            {
                return Err(AppError::Delivery {
                    path: path.to_string(),
                    reason: "share offline".into(),
                });
            }
            self.uploads.push((path.to_string(), bytes.to_vec()));
            Ok(format!("memory://{path}"))
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 19).unwrap()
    }

    fn entry(job: &str, rt: f64, comments: &str) -> TimeEntry {
        let mut e = TimeEntry::new(date());
        e.job_number = job.into();
        e.job_area = "3".into();
        e.employee_name = "Kim Ito".into();
        e.class_type = "0100".into();
        e.rt_hours = rt;
        e.comments = comments.into();
        e
    }

    fn request() -> ExportRequest {
        ExportRequest {
            date: date(),
            options: ExportOptions::default(),
            include_summary: true,
            include_descriptions: true,
            triggered_by: "ops@example.com".into(),
            dry_run: false,
        }
    }

    #[test]
    fn empty_day_reports_no_data() {
        let mut store = MemoryStore::new();
        let mut delivery = RecordingDelivery::default();

        let outcome = ExportLogic::run(&mut store, &mut delivery, &request()).unwrap();
        assert_eq!(outcome, ExportOutcome::NoData);
        assert!(delivery.uploads.is_empty());
    }

    #[test]
    fn one_document_per_job_plus_summary_and_descriptions() {
        let mut store = MemoryStore::new();
        store
            .insert(&[
                entry("100", 8.0, "Set forms"),
                entry("100", 6.0, ""),
                entry("200", 4.0, ""),
            ])
            .unwrap();
        let mut delivery = RecordingDelivery::default();

        let ExportOutcome::Completed(report) =
            ExportLogic::run(&mut store, &mut delivery, &request()).unwrap()
        else {
            panic!("expected a completed export");
        };

        assert_eq!(report.count(DocumentKind::TimeImport), 2);
        assert_eq!(report.count(DocumentKind::DaySummary), 1);
        assert_eq!(report.count(DocumentKind::Descriptions), 1);
        assert_eq!(report.delivered(), 4);

        let paths: Vec<&str> = delivery.uploads.iter().map(|(p, _)| p.as_str()).collect();
        assert!(paths.contains(&"September/09-19-2025 - 100 - Daily Time Import.xlsx"));
        assert!(paths.contains(&"September/09-19-2025 - 200 - Daily Time Import.xlsx"));
        assert!(paths.contains(&"September/09-19-2025 - Daily Time.xlsx"));
        assert!(paths.contains(&"September/09-19-2025 - 100 - Description.xlsx"));

        let log = store.export_history(Some(date())).unwrap();
        assert_eq!(log.len(), 4);
        assert!(log.iter().all(|r| r.status == ExportStatus::Created));
        assert_eq!(log[0].entries_count, 2);
    }

    #[test]
    fn failed_delivery_does_not_stop_other_documents() {
        let mut store = MemoryStore::new();
        store
            .insert(&[entry("100", 8.0, ""), entry("200", 4.0, "")])
            .unwrap();
        let mut delivery = RecordingDelivery {
            fail_on: Some(" - 100 - ".into()),
            ..RecordingDelivery::default()
        };

        let ExportOutcome::Completed(report) =
            ExportLogic::run(&mut store, &mut delivery, &request()).unwrap()
        else {
            panic!("expected a completed export");
        };

        assert_eq!(report.failed(), 1);
        assert_eq!(report.delivered(), 2);

        let log = store.export_history(None).unwrap();
        let failed: Vec<_> = log
            .iter()
            .filter(|r| r.status == ExportStatus::Failed)
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].job_number, "100");
        assert!(failed[0].notes.contains("share offline"));
    }

    #[test]
    fn dry_run_delivers_nothing() {
        let mut store = MemoryStore::new();
        store.insert(&[entry("100", 8.0, "")]).unwrap();
        let mut delivery = RecordingDelivery::default();
        let req = ExportRequest {
            dry_run: true,
            ..request()
        };

        let ExportOutcome::Completed(report) =
            ExportLogic::run(&mut store, &mut delivery, &req).unwrap()
        else {
            panic!("expected a completed export");
        };

        assert!(delivery.uploads.is_empty());
        assert!(
            report
                .documents
                .iter()
                .all(|d| d.status == DocumentStatus::Skipped)
        );
        assert!(store.export_history(None).unwrap().is_empty());
    }

    #[test]
    fn rerun_targets_the_same_documents() {
        let mut store = MemoryStore::new();
        store.insert(&[entry("100", 8.0, "")]).unwrap();
        let req = ExportRequest {
            include_summary: false,
            include_descriptions: false,
            ..request()
        };

        let mut first = RecordingDelivery::default();
        let mut second = RecordingDelivery::default();
        ExportLogic::run(&mut store, &mut first, &req).unwrap();
        ExportLogic::run(&mut store, &mut second, &req).unwrap();

        assert_eq!(first.uploads.len(), 1);
        assert_eq!(first.uploads[0].0, second.uploads[0].0);
    }
}
