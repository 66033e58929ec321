//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from an optional TOML file. A missing or
//! broken file never stops startup: a warning is logged and compiled
//! defaults are used instead.
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `TASAS_ROOT_FOLDER` environment variable
//! 3. `root_folder` in the TOML config file
//! 4. OS-dependent compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "TASAS_ROOT_FOLDER";

/// Environment variable pointing at an explicit config file
pub const CONFIG_FILE_ENV: &str = "TASAS_CONFIG";

const DEFAULT_DATABASE: &str = "tasas.db";
const DEFAULT_MEDIA_FOLDER: &str = "media";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Root folder holding the database and media (optional)
    pub root_folder: Option<PathBuf>,

    /// Database file, relative to the root folder unless absolute
    pub database: Option<PathBuf>,

    /// Folder for attached logos, relative to the root folder unless absolute
    pub media_folder: Option<PathBuf>,

    pub import: ImportSettings,
    pub api: ApiSettings,
    pub logging: LoggingConfig,
}

/// Year window settings for the importer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// First academic year looked up in every record
    pub min_year: i32,

    /// Years past the current course still looked up
    pub years_in_advance: i32,

    /// Month (1-12) in which a new course starts
    pub course_start_month: u32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            min_year: 2012,
            years_in_advance: 1,
            course_start_month: 9,
        }
    }
}

/// HTTP listener settings for the API server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5780,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Find and load the config file without logging
    ///
    /// Binaries call this before tracing is initialized (the file carries the
    /// log level) and log the returned [`ConfigOrigin`] afterwards.
    pub fn discover() -> (Self, ConfigOrigin) {
        let Some(path) = config_file_path() else {
            return (Self::default(), ConfigOrigin::Defaults);
        };

        match Self::load(&path) {
            Ok(config) => (config, ConfigOrigin::File(path)),
            Err(e) => (
                Self::default(),
                ConfigOrigin::Invalid {
                    path,
                    error: e.to_string(),
                },
            ),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let import = &self.import;
        if !(1..=12).contains(&import.course_start_month) {
            return Err(Error::Config(format!(
                "import.course_start_month must be between 1 and 12 (got {})",
                import.course_start_month
            )));
        }
        if import.min_year <= 0 {
            return Err(Error::Config(format!(
                "import.min_year must be positive (got {})",
                import.min_year
            )));
        }
        if import.years_in_advance < 0 {
            return Err(Error::Config(format!(
                "import.years_in_advance must not be negative (got {})",
                import.years_in_advance
            )));
        }
        Ok(())
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Defaults,
    File(PathBuf),
    Invalid { path: PathBuf, error: String },
}

impl ConfigOrigin {
    pub fn log(&self) {
        match self {
            ConfigOrigin::Defaults => info!("No config file found, using compiled defaults"),
            ConfigOrigin::File(path) => info!("Loaded config file: {}", path.display()),
            ConfigOrigin::Invalid { path, error } => {
                warn!("Ignoring config file {}: {}", path.display(), error)
            }
        }
    }
}

/// Config file location: `$TASAS_CONFIG`, else `<config_dir>/tasas/config.toml` if present
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|d| d.join("tasas").join("config.toml"))
        .filter(|p| p.exists())
}

/// Resolve the root folder following the priority order in the module docs
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tasas"))
        .unwrap_or_else(|| PathBuf::from("./tasas_data"))
}

/// Root folder plus the database and media paths derived from it
#[derive(Debug, Clone)]
pub struct RootFolder {
    root: PathBuf,
    database: PathBuf,
    media: PathBuf,
}

impl RootFolder {
    pub fn new(root: PathBuf, config: &TomlConfig) -> Self {
        let database = join_under(&root, config.database.as_deref(), DEFAULT_DATABASE);
        let media = join_under(&root, config.media_folder.as_deref(), DEFAULT_MEDIA_FOLDER);
        Self {
            root,
            database,
            media,
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn database_path(&self) -> &Path {
        &self.database
    }

    pub fn media_path(&self) -> &Path {
        &self.media
    }

    /// Replace the database path (command-line override)
    pub fn with_database(mut self, database: PathBuf) -> Self {
        self.database = database;
        self
    }

    /// Create the root and media folders if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        for dir in [&self.root, &self.media] {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
                info!("Created directory: {}", dir.display());
            }
        }
        Ok(())
    }
}

fn join_under(root: &Path, configured: Option<&Path>, default: &str) -> PathBuf {
    match configured {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => root.join(p),
        None => root.join(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.import.min_year, 2012);
        assert_eq!(config.import.years_in_advance, 1);
        assert_eq!(config.import.course_start_month, 9);
        assert_eq!(config.api.port, 5780);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TomlConfig::parse("[import]\nmin_year = 2015\n").unwrap();
        assert_eq!(config.import.min_year, 2015);
        assert_eq!(config.import.course_start_month, 9);
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn test_invalid_month_rejected() {
        let err = TomlConfig::parse("[import]\ncourse_start_month = 13\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_root_folder_paths() {
        let config = TomlConfig::parse("database = \"data/fees.db\"\nmedia_folder = \"/srv/media\"\n")
            .unwrap();
        let root = RootFolder::new(PathBuf::from("/var/lib/tasas"), &config);

        assert_eq!(root.database_path(), Path::new("/var/lib/tasas/data/fees.db"));
        assert_eq!(root.media_path(), Path::new("/srv/media"));

        let root = RootFolder::new(PathBuf::from("/x"), &TomlConfig::default());
        assert_eq!(root.database_path(), Path::new("/x/tasas.db"));
        assert_eq!(root.media_path(), Path::new("/x/media"));
    }

    #[test]
    fn test_cli_argument_wins() {
        let config = TomlConfig {
            root_folder: Some(PathBuf::from("/from/toml")),
            ..Default::default()
        };
        let resolved = resolve_root_folder(Some(Path::new("/from/cli")), &config);
        assert_eq!(resolved, PathBuf::from("/from/cli"));
    }
}
