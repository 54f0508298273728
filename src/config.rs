//! Runtime configuration, read from the environment.
//!
//! A `.env` file in the working directory is loaded first (through
//! [`dotenvy`]), so the same variables can live there during development.
//!
//! - `FERRUM_WORKBOOK`: JSON workbook to load at start and write on `save`
//! - `FERRUM_KEY_COLUMN`: key column for lookups, `id` when unset
//! - `FERRUM_SHEET`: sheet selected when the session starts, `sheet1` when unset
//! - `FERRUM_LOG`: log level used when `RUST_LOG` is not set, `warn` when unset

use std::path::PathBuf;

use crate::persistence::DEFAULT_KEY_COLUMN;

pub const DEFAULT_SHEET: &str = "sheet1";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub workbook_path: Option<PathBuf>,
    pub key_column: String,
    pub sheet: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            workbook_path: None,
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            sheet: DEFAULT_SHEET.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Config {
        //! Load `.env` if there is one, then read the process environment.

        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("environment loaded from {}", path.display());
        }

        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        //! Build a config from any variable source. Blank values count as
        //! unset.

        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Config::default();

        Config {
            workbook_path: read("FERRUM_WORKBOOK").map(PathBuf::from),
            key_column: read("FERRUM_KEY_COLUMN").unwrap_or(defaults.key_column),
            sheet: read("FERRUM_SHEET").unwrap_or(defaults.sheet),
            log_level: read("FERRUM_LOG").unwrap_or(defaults.log_level),
        }
    }
}
