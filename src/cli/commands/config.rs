use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::config_path;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config, path } = &cli.command {
        let file = config_path(cli);

        if *path {
            println!("{}", file.display());
        }

        // no flag → print, same as --print
        if *print_config || !*path {
            if !file.exists() {
                println!("# {} not found, showing defaults", file.display());
            }
            print!("{}", serde_yaml::to_string(cfg)?);
        }
    }
    Ok(())
}
