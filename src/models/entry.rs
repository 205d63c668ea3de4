use crate::utils::fields::{clean_blank, coerce_hours, pad_job_area};
use chrono::NaiveDate;
use serde::Serialize;

/// One row of labor: employee × job × cost code × date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub job_number: String,
    pub job_area: String,
    pub employee_name: String,
    pub employee_number: String,
    pub trade_class: String,
    pub time_record_type: String,
    /// Cost code.
    pub class_type: String,
    pub rt_hours: f64,
    pub ot_hours: f64,
    /// Unsplit total, only consulted when both RT and OT are zero.
    pub total_hours: Option<f64>,
    pub night_shift: String,
    pub premium_code: String,
    pub comments: String,
    pub created_by: String,
    pub created_at: String,
}

impl TimeEntry {
    /// Empty entry for a date; stores assign `id` on insert.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: 0,
            date,
            job_number: String::new(),
            job_area: String::new(),
            employee_name: String::new(),
            employee_number: String::new(),
            trade_class: String::new(),
            time_record_type: String::new(),
            class_type: String::new(),
            rt_hours: 0.0,
            ot_hours: 0.0,
            total_hours: None,
            night_shift: String::new(),
            premium_code: String::new(),
            comments: String::new(),
            created_by: String::new(),
            created_at: String::new(),
        }
    }

    /// Canonical form written by every store.
    pub fn normalized(&self) -> Self {
        Self {
            id: self.id,
            date: self.date,
            job_number: clean_blank(&self.job_number, false),
            job_area: pad_job_area(&clean_blank(&self.job_area, false)),
            employee_name: clean_blank(&self.employee_name, false),
            employee_number: clean_blank(&self.employee_number, false),
            trade_class: clean_blank(&self.trade_class, false),
            time_record_type: clean_blank(&self.time_record_type, false),
            class_type: clean_blank(&self.class_type, false),
            rt_hours: coerce_hours(self.rt_hours),
            ot_hours: coerce_hours(self.ot_hours),
            total_hours: self.total_hours.map(coerce_hours),
            night_shift: clean_blank(&self.night_shift, true),
            premium_code: clean_blank(&self.premium_code, false),
            comments: self.comments.trim().to_string(),
            created_by: self.created_by.trim().to_string(),
            created_at: self.created_at.clone(),
        }
    }

    /// Minimal completeness check applied before insert.
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.job_number.trim().is_empty() {
            Some("job number")
        } else if self.job_area.trim().is_empty() {
            Some("job area")
        } else if self.employee_name.trim().is_empty() {
            Some("employee name")
        } else if self.class_type.trim().is_empty() {
            Some("class type (cost code)")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_pads_area_and_cleans_fields() {
        let mut e = TimeEntry::new(NaiveDate::from_ymd_opt(2025, 9, 19).unwrap());
        e.job_number = " 4500123 ".into();
        e.job_area = "7".into();
        e.night_shift = "y".into();
        e.premium_code = "nan".into();
        e.rt_hours = -2.0;
        e.ot_hours = f64::NAN;

        let n = e.normalized();
        assert_eq!(n.job_number, "4500123");
        assert_eq!(n.job_area, "007");
        assert_eq!(n.night_shift, "Y");
        assert_eq!(n.premium_code, "");
        assert_eq!(n.rt_hours, 0.0);
        assert_eq!(n.ot_hours, 0.0);
    }

    #[test]
    fn reports_first_missing_field() {
        let mut e = TimeEntry::new(NaiveDate::from_ymd_opt(2025, 9, 19).unwrap());
        assert_eq!(e.missing_required(), Some("job number"));
        e.job_number = "100".into();
        e.job_area = "1".into();
        e.employee_name = "Jane Roe".into();
        assert_eq!(e.missing_required(), Some("class type (cost code)"));
        e.class_type = "0100".into();
        assert_eq!(e.missing_required(), None);
    }
}
