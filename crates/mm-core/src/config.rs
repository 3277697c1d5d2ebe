//! Configuration types and parsing for menu_migrations.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names looked up in a project directory, in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["menu_migrations.yml", "menu_migrations.yaml"];

/// Environment variable overriding the database path
pub const DATABASE_ENV_VAR: &str = "MENU_MIGRATIONS_DATABASE";

/// Project configuration from menu_migrations.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the migration files, relative to the project root
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Default webapp written into new migration templates
    #[serde(default)]
    pub webapp: Option<String>,

    /// Force every migration into dry-run mode
    #[serde(default)]
    pub dry_run: bool,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database path (DuckDB file or :memory:)
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            migrations_path: default_migrations_path(),
            webapp: None,
            dry_run: false,
            database: DatabaseConfig::default(),
        }
    }
}

fn default_migrations_path() -> String {
    "db/menu".to_string()
}

fn default_db_path() -> String {
    "menu.duckdb".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for menu_migrations.yml or menu_migrations.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Like [`load_from_dir`](Self::load_from_dir), falling back to defaults
    /// when the directory has no config file.
    pub fn load_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { path }) => {
                log::debug!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.migrations_path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_path cannot be empty".to_string(),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }
        if let Some(webapp) = &self.webapp {
            crate::validate::validate(&[Some(webapp.as_str())])?;
        }
        Ok(())
    }

    /// Absolute migrations directory for a project root
    pub fn migrations_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_path)
    }

    /// Resolve the database path.
    ///
    /// Priority: CLI flag > MENU_MIGRATIONS_DATABASE env var > config file
    pub fn resolve_database(&self, cli_database: Option<&str>) -> String {
        cli_database
            .map(String::from)
            .or_else(|| std::env::var(DATABASE_ENV_VAR).ok())
            .unwrap_or_else(|| self.database.path.clone())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
