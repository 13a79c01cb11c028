use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local SQLite database holding the store and the internal log.
    pub database: String,
    /// Opaque id of the remote workbook; `None` disables remote sync.
    #[serde(default)]
    pub sheet_id: Option<String>,
    /// Directory holding file-backed workbooks (`<sheet_id>.sqlite`).
    #[serde(default = "default_sheets_dir")]
    pub sheets_dir: String,
    /// Calendar database path; `None` means no calendar backend.
    #[serde(default)]
    pub calendar: Option<String>,
    #[serde(default)]
    pub default_owner: String,
}

fn default_sheets_dir() -> String {
    Config::config_dir()
        .join("sheets")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            sheet_id: None,
            sheets_dir: default_sheets_dir(),
            calendar: None,
            default_owner: String::new(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("worktrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".worktrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("worktrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("worktrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = self.to_yaml()?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn sheets_path(&self) -> PathBuf {
        expand_tilde(&self.sheets_dir)
    }

    pub fn calendar_path(&self) -> Option<PathBuf> {
        self.calendar
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(expand_tilde)
    }

    /// Initialize configuration and database files.
    /// The config file is left untouched in test mode.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        let mut config = Self::load().unwrap_or_default();

        if let Some(name) = custom_db {
            let p = Path::new(&name);
            config.database = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }
}
