use serde::{Deserialize, Serialize};

/// Outcome of delivering one export document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportStatus {
    Created,
    Failed,
}

impl ExportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStatus::Created => "Created",
            ExportStatus::Failed => "Failed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(ExportStatus::Created),
            "Failed" => Some(ExportStatus::Failed),
            _ => None,
        }
    }
}

/// One row of the exports log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub log_id: String,
    /// Export date (`YYYY-MM-DD`).
    pub date: String,
    /// Empty for whole-day documents.
    pub job_number: String,
    pub entries_count: usize,
    pub file_name: String,
    pub delivery_path: String,
    pub link: String,
    pub triggered_by: String,
    pub triggered_at: String,
    pub status: ExportStatus,
    pub notes: String,
}
