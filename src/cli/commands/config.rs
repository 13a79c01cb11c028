use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

fn edit(cfg: &Config, requested: Option<&str>) -> AppResult<()> {
    let path = Config::config_file();
    if !path.exists() {
        cfg.save()?;
        info(format!("Created {}", path.display()));
    }

    let fallback = default_editor();
    let editor = requested.map(str::to_string).unwrap_or_else(|| fallback.clone());

    if run_editor(&editor, &path) {
        success(format!("Configuration file edited using '{editor}'"));
        return Ok(());
    }

    warning(format!("Editor '{editor}' not available, falling back to '{fallback}'"));
    if run_editor(&fallback, &path) {
        success(format!("Configuration file edited using fallback '{fallback}'"));
    } else {
        error(format!("Failed to edit configuration file using fallback '{fallback}'"));
    }
    Ok(())
}

/// Handle the `config` subcommand. `--print` shows the effective
/// configuration, global overrides included.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        edit(cfg, editor.as_deref())?;
    }

    Ok(())
}
