use crate::cli::parser::Commands;
use crate::config::{Config, migrate};
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate: do_migrate,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            let content = fs::read_to_string(&path)?;
            println!("📄 {}:\n\n{}", path.display(), content);
        }

        if *check {
            let missing = migrate::missing_keys()?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!("Missing keys: {}", missing.join(", ")));
                info("Run 'rruntracker config --migrate' to fill them with defaults.");
            }
        }

        if *do_migrate {
            migrate::migrate_config()?;
        }
    }

    Ok(())
}
