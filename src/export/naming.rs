// src/export/naming.rs

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Worksheet name the payroll import tool looks for.
pub const TIME_ENTRIES_SHEET: &str = "TimeEntries";
pub const DESCRIPTIONS_SHEET: &str = "Descriptions";

/// Date part of the filename grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameDate {
    /// `09-19-2025`
    MonthFirst,
    /// `19-09-2025`
    DayFirst,
}

impl FilenameDate {
    pub fn parse(fmt: &str) -> AppResult<Self> {
        match fmt {
            "%m-%d-%Y" => Ok(FilenameDate::MonthFirst),
            "%d-%m-%Y" => Ok(FilenameDate::DayFirst),
            other => Err(AppError::Config(format!(
                "unsupported filename date format: {other}"
            ))),
        }
    }

    fn render(&self, date: NaiveDate) -> String {
        match self {
            FilenameDate::MonthFirst => date.format("%m-%d-%Y").to_string(),
            FilenameDate::DayFirst => date.format("%d-%m-%Y").to_string(),
        }
    }
}

/// Deployment-specific parts of the naming contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConfig {
    pub date_format: FilenameDate,
    /// Separator in the whole-day filename: `-` or the en-dash `–`.
    pub summary_separator: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            date_format: FilenameDate::MonthFirst,
            summary_separator: "-".to_string(),
        }
    }
}

impl NamingConfig {
    /// `"{date} - {job} - Daily Time Import.xlsx"`
    pub fn job_file_name(&self, date: NaiveDate, job_number: &str) -> String {
        format!(
            "{} - {} - Daily Time Import.xlsx",
            self.date_format.render(date),
            job_number
        )
    }

    /// `"{date} - Daily Time.xlsx"`
    pub fn summary_file_name(&self, date: NaiveDate) -> String {
        format!(
            "{} {} Daily Time.xlsx",
            self.date_format.render(date),
            self.summary_separator
        )
    }

    /// `"{date} - {job} - Description.xlsx"`
    pub fn description_file_name(&self, date: NaiveDate, job_number: &str) -> String {
        format!(
            "{} - {} - Description.xlsx",
            self.date_format.render(date),
            job_number
        )
    }
}

/// Logical storage path handed to the delivery collaborator:
/// `"{FullMonthName}/{filename}"`.
pub fn delivery_path(date: NaiveDate, file_name: &str) -> String {
    format!("{}/{}", date.format("%B"), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sept_19() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 19).unwrap()
    }

    #[test]
    fn job_file_name_is_exact() {
        let naming = NamingConfig::default();
        assert_eq!(
            naming.job_file_name(sept_19(), "4500123"),
            "09-19-2025 - 4500123 - Daily Time Import.xlsx"
        );
    }

    #[test]
    fn day_first_variant() {
        let naming = NamingConfig {
            date_format: FilenameDate::parse("%d-%m-%Y").unwrap(),
            ..NamingConfig::default()
        };
        assert_eq!(
            naming.job_file_name(sept_19(), "100"),
            "19-09-2025 - 100 - Daily Time Import.xlsx"
        );
    }

    #[test]
    fn summary_file_name_separators() {
        let hyphen = NamingConfig::default();
        assert_eq!(hyphen.summary_file_name(sept_19()), "09-19-2025 - Daily Time.xlsx");

        let en_dash = NamingConfig {
            summary_separator: "–".into(),
            ..NamingConfig::default()
        };
        assert_eq!(en_dash.summary_file_name(sept_19()), "09-19-2025 – Daily Time.xlsx");
    }

    #[test]
    fn description_and_delivery_paths() {
        let naming = NamingConfig::default();
        let name = naming.description_file_name(sept_19(), "200");
        assert_eq!(name, "09-19-2025 - 200 - Description.xlsx");
        assert_eq!(
            delivery_path(sept_19(), &name),
            "September/09-19-2025 - 200 - Description.xlsx"
        );
    }

    #[test]
    fn rejects_unknown_date_format() {
        assert!(FilenameDate::parse("%Y-%m-%d").is_err());
    }
}
