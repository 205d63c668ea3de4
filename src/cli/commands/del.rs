use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::open_store;
use crate::ui::messages::{info, success, warning};
use crate::utils::date;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date: date_str,
        ids,
        yes,
    } = cmd
    {
        let d = date::require_date(date_str)?;
        let mut store = open_store(cfg)?;

        // only ids that belong to the given day are deleted
        let on_day: Vec<i64> = store.query(d, None)?.iter().map(|e| e.id).collect();
        let (targets, foreign): (Vec<i64>, Vec<i64>) =
            ids.iter().partition(|id| on_day.contains(id));

        for id in &foreign {
            warning(format!("Entry #{} is not recorded on {}: skipped.", id, d));
        }

        if targets.is_empty() {
            info("Nothing to delete.");
            return Ok(());
        }

        if !*yes {
            let prompt = format!(
                "Delete {} entr{} for {}? This action is irreversible.",
                targets.len(),
                if targets.len() == 1 { "y" } else { "ies" },
                d
            );
            if !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let removed = store.delete(&targets)?;
        success(format!(
            "Deleted {} entr{} for {}.",
            removed,
            if removed == 1 { "y" } else { "ies" },
            d
        ));
    }

    Ok(())
}
