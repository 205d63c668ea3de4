use crate::cli::parser::{Cli, Commands};
use crate::config::{Backend, Config};
use crate::config_path;
use crate::errors::AppResult;
use crate::db::log::ttlog;
use crate::store::{SqliteStore, open_store};
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (unless it already exists)
///  - the entry store of the configured backend (schema / header row)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let force = matches!(cli.command, Commands::Init { force: true });
    let path = config_path(cli);

    //
    // 1️⃣ configuration file
    //
    if path.exists() && !force {
        warning(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    } else {
        cfg.save(&path)?;
        success(format!("Config file: {}", path.display()));
    }

    //
    // 2️⃣ store (tables + migrations, or CSV header)
    //
    info(format!(
        "Initializing {} store at {}",
        cfg.backend.as_str(),
        cfg.store_path()
    ));
    match cfg.backend {
        Backend::Sqlite => {
            let mut store = SqliteStore::open(&cfg.database)?;
            ttlog(
                &store.pool().conn,
                "init",
                &cfg.database,
                "Database initialized",
            )?;
        }
        Backend::Csv => {
            open_store(cfg)?;
        }
    }

    success(format!("Store initialized at {}", cfg.store_path()));
    Ok(())
}
