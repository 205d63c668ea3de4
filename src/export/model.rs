// src/export/model.rs

use crate::models::PayCodeKind;

/// Column order of the payroll import sheet.
pub const EXPORT_HEADERS: [&str; 14] = [
    "Date",
    "Time Record Type",
    "Person Number",
    "Employee Name",
    "Override Trade Class",
    "Post To Payroll",
    "Cost Code / Phase",
    "JobArea",
    "Scope Change",
    "Pay Code",
    "Hours",
    "Night Shift",
    "Premium Rate / Subsistence Rate / Travel Rate",
    "Comments",
];

/// Index of the `Override Trade Class` column in [`EXPORT_HEADERS`].
pub const TRADE_CLASS_COLUMN: usize = 4;

/// Index of the `Hours` column in [`EXPORT_HEADERS`].
pub const HOURS_COLUMN: usize = 10;

/// One payroll line: one entry under one pay code.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportLineItem {
    /// `YYYY-MM-DD`
    pub date: String,
    pub time_record_type: String,
    pub person_number: String,
    pub employee_name: String,
    pub override_trade_class: String,
    pub post_to_payroll: String,
    pub cost_code: String,
    pub job_area: String,
    pub scope_change: String,
    pub kind: PayCodeKind,
    pub pay_code: String,
    pub hours: f64,
    pub night_shift: String,
    pub premium: String,
    pub comments: String,
}

/// Cell content after flattening a line item.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Text(s) => unicode_width::UnicodeWidthStr::width(s.as_str()),
            CellValue::Number(n) => format!("{n:.2}").len(),
        }
    }
}

/// Flatten a line item in [`EXPORT_HEADERS`] order. `Hours` stays numeric.
pub fn line_to_row(l: &ExportLineItem) -> Vec<CellValue> {
    vec![
        CellValue::Text(l.date.clone()),
        CellValue::Text(l.time_record_type.clone()),
        CellValue::Text(l.person_number.clone()),
        CellValue::Text(l.employee_name.clone()),
        CellValue::Text(l.override_trade_class.clone()),
        CellValue::Text(l.post_to_payroll.clone()),
        CellValue::Text(l.cost_code.clone()),
        CellValue::Text(l.job_area.clone()),
        CellValue::Text(l.scope_change.clone()),
        CellValue::Text(l.pay_code.clone()),
        CellValue::Number(l.hours),
        CellValue::Text(l.night_shift.clone()),
        CellValue::Text(l.premium.clone()),
        CellValue::Text(l.comments.clone()),
    ]
}

/// Line items for one job on one date, with the document name.
#[derive(Clone, Debug, PartialEq)]
pub struct JobExport {
    pub job_number: String,
    pub file_name: String,
    pub lines: Vec<ExportLineItem>,
}

/// Whole-day document: every line of the day, tagged with its job.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySummary {
    pub file_name: String,
    pub lines: Vec<(String, ExportLineItem)>,
}

/// Unique work descriptions for one job.
#[derive(Clone, Debug, PartialEq)]
pub struct JobDescriptions {
    pub job_number: String,
    pub file_name: String,
    pub descriptions: Vec<String>,
}
