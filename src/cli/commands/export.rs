use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::{
    ExportLogic, ExportOptions, ExportOutcome, ExportRequest, FolderDelivery, print_report,
};
use crate::store::open_store;
use crate::ui::messages::{info, warning};
use crate::utils::date;

/// Who triggered the run: `--by`, else the login name.
fn resolve_trigger(by: &Option<String>) -> String {
    by.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        date: date_str,
        out,
        by,
        reg,
        ot,
        subsistence,
        no_subsistence,
        no_summary,
        no_descriptions,
        dry_run,
    } = cmd
    {
        let d = date::date_or_today(date_str.as_ref())?;

        let mut options = ExportOptions::from_config(cfg)?;
        options.pay_codes = options.pay_codes.with_overrides(
            reg.as_deref(),
            ot.as_deref(),
            subsistence.as_deref(),
        );
        options.pay_codes.validate()?;
        if *no_subsistence {
            options.subsistence = false;
        }

        let request = ExportRequest {
            date: d,
            options,
            include_summary: cfg.export_summary && !*no_summary,
            include_descriptions: cfg.export_descriptions && !*no_descriptions,
            triggered_by: resolve_trigger(by),
            dry_run: *dry_run,
        };

        let root = out.clone().unwrap_or_else(|| cfg.output_dir.clone());
        let mut delivery = FolderDelivery::new(&root);
        let mut store = open_store(cfg)?;

        info(format!("Exporting {} into {}", d, delivery.root().display()));

        match ExportLogic::run(store.as_mut(), &mut delivery, &request)? {
            ExportOutcome::NoData => {
                warning(format!("No matching rows for {}. No files created.", d));
            }
            ExportOutcome::Completed(report) => {
                print_report(&report);
                let failed = report.failed();
                if failed > 0 {
                    return Err(AppError::Other(format!(
                        "{failed} document(s) could not be exported"
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_trigger_wins() {
        assert_eq!(resolve_trigger(&Some(" alice ".into())), "alice");
        assert!(!resolve_trigger(&None).is_empty());
    }
}
