use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::open_db;
use crate::errors::AppResult;
use crate::store::persist::{panel_collapsed, set_panel_collapsed};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Panel { collapse, expand } = cmd else {
        return Ok(());
    };

    let pool = open_db(&cfg.database)?;
    let storage = pool.storage();

    if *collapse || *expand {
        set_panel_collapsed(&storage, *collapse)?;
    }

    let state = if panel_collapsed(&storage)? { "collapsed" } else { "expanded" };
    println!("Panel: {state}");
    Ok(())
}
