//! INI file configuration adapter.
//!
//! Sections read by the backtester are `[backtest]`, `[strategy]` and
//! `[output]`. Keys are case-insensitive.

use crate::domain::error::BacktestError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file(path: &Path) -> Result<Self, BacktestError> {
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| parse_error(&path.display().to_string(), reason))?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, BacktestError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| parse_error("<inline>", reason))?;
        Ok(Self { config })
    }
}

fn parse_error(file: &str, reason: String) -> BacktestError {
    BacktestError::ConfigParse {
        file: file.to_string(),
        reason,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}
