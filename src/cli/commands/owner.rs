use crate::cli::parser::{Commands, OwnerAction};
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::store::persist::{load_owners, save_owners};
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Owner { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(&cfg.database)?;
    let storage = pool.storage();
    let mut owners = load_owners(&storage)?;

    match action {
        OwnerAction::Add { name } => {
            if owners.add(name) {
                save_owners(&storage, &owners)?;
                success(format!("Owner '{}' added", name.trim()));
            } else {
                warning(format!("Owner '{}' already known or empty", name.trim()));
            }
        }
        OwnerAction::Del { name } => {
            if owners.remove(name) {
                save_owners(&storage, &owners)?;
                success(format!("Owner '{}' removed", name.trim()));
            } else {
                warning(format!("Owner '{}' not found", name.trim()));
            }
        }
        OwnerAction::List => {
            if owners.names().is_empty() {
                info("No owners yet.");
            }
            for n in owners.names() {
                println!("- {n}");
            }
        }
    }

    Ok(())
}
