// ABOUTME: Runtime configuration for great-scott loaded from the environment
// ABOUTME: Reads an optional .env file and validates interpreter, manage.py and log settings

pub mod constants;

use constants::*;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is set but empty")]
    EmptyValue(&'static str),
    #[error("{name} must be true or false, got '{value}'")]
    InvalidBool { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Python interpreter used to run Django
    pub python: String,
    /// Path to the project's manage.py, relative to the working directory
    pub manage_py: String,
    /// tracing-subscriber filter directive
    pub log_filter: String,
    pub no_color: bool,
    /// `.env` file that was loaded into the environment, if any
    pub env_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            manage_py: DEFAULT_MANAGE_PY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            no_color: false,
            env_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, after loading `.env` if present.
    ///
    /// Runs before logging is set up, so the loaded file is reported through `env_file`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_file = dotenvy::dotenv().ok();

        Ok(Config {
            env_file,
            ..Self::from_lookup(|name| env::var(name).ok())?
        })
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let python = non_empty(&lookup, GREAT_SCOTT_PYTHON)?.unwrap_or(defaults.python);
        let manage_py = non_empty(&lookup, GREAT_SCOTT_MANAGE_PY)?.unwrap_or(defaults.manage_py);
        let log_filter = non_empty(&lookup, GREAT_SCOTT_LOG)?.unwrap_or(defaults.log_filter);

        let no_color = match lookup(GREAT_SCOTT_NO_COLOR) {
            Some(value) => parse_bool(GREAT_SCOTT_NO_COLOR, &value)?,
            None => defaults.no_color,
        };

        Ok(Config {
            python,
            manage_py,
            log_filter,
            no_color,
            env_file: None,
        })
    }
}

fn non_empty<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(name)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}
