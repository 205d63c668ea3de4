// src/export/mod.rs

pub mod delivery;
pub mod logic;
pub mod model;
pub mod naming;
pub mod split;
pub mod transform;
pub mod xlsx;

pub use delivery::{Delivery, FolderDelivery};
pub use logic::{
    DocumentKind, DocumentResult, DocumentStatus, ExportLogic, ExportOutcome, ExportReport,
    ExportRequest,
};
pub use model::{EXPORT_HEADERS, ExportLineItem, JobExport};
pub use transform::{ExportOptions, build_job_exports, expand_entry, has_subsistence};

use crate::ui::messages::{info, success, warning};

/// Print the per-document outcome of an export run.
pub fn print_report(report: &ExportReport) {
    for doc in &report.documents {
        match &doc.status {
            DocumentStatus::Delivered { link } => success(format!(
                "{} ({} line(s)) → {}",
                doc.file_name, doc.entries_count, link
            )),
            DocumentStatus::Skipped => info(format!(
                "[dry-run] {} ({} line(s)) → {}",
                doc.file_name, doc.entries_count, doc.delivery_path
            )),
            DocumentStatus::Failed { error } => {
                warning(format!("{} NOT exported: {}", doc.file_name, error))
            }
        }
    }

    info(format!(
        "{}: {} TimeEntries, {} Daily Time, {} Description file(s); {} failed.",
        report.date,
        report.count(DocumentKind::TimeImport),
        report.count(DocumentKind::DaySummary),
        report.count(DocumentKind::Descriptions),
        report.failed()
    ));
}
