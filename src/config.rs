//! Runtime configuration: where the database lives, where exports go, and how
//! chatty the log file is. Values come from command-line flags (with
//! environment fallbacks handled by clap), then an optional TOML file, then
//! hard-coded defaults beneath the user's home directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::BaseDirs;
use serde::Deserialize;
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".user-records";
/// Database name used when nothing else is configured.
const DEFAULT_DATABASE: &str = "users";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "user-records.log";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    NoHomeDirectory,
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("database name must not be empty")]
    EmptyDatabaseName,
}

/// Command-line surface of the binary.
#[derive(Debug, Default, Parser)]
#[command(name = "user-records", version, about = "Terminal manager for user records")]
pub struct Cli {
    /// Directory holding the database file and the log file.
    #[arg(long, env = "USER_RECORDS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Database name; the file is `<data-dir>/<name>.sqlite`.
    #[arg(long, env = "USER_RECORDS_DATABASE")]
    pub database: Option<String>,

    /// TOML config file to read instead of `~/.user-records/config.toml`.
    #[arg(long, env = "USER_RECORDS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the export prompt starts in.
    #[arg(long)]
    pub export_dir: Option<PathBuf>,
}

/// Connection descriptor for the embedded store: the directory the database
/// lives in and its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub data_dir: PathBuf,
    pub database: String,
}

impl ConnectionConfig {
    pub fn new(data_dir: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            database: database.into(),
        }
    }

    /// Absolute path of the SQLite file this descriptor points at.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.sqlite", self.database))
    }
}

/// Fully resolved settings handed to `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub export_dir: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    /// Resolve settings from the parsed command line, reading the config file
    /// if there is one. A missing default config file is fine; a missing file
    /// the user named explicitly is not.
    ///
    /// The home directory is only consulted for values nothing else supplied.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match (&cli.config, default_data_dir()) {
            (Some(path), _) => load_file(path, true)?,
            (None, Ok(dir)) => load_file(&dir.join(CONFIG_FILE_NAME), false)?,
            (None, Err(_)) => FileConfig::default(),
        };
        Self::merge(cli, file, default_data_dir)
    }

    /// File the tracing subscriber appends to.
    pub fn log_path(&self) -> PathBuf {
        self.connection.data_dir.join(LOG_FILE_NAME)
    }

    fn merge(
        cli: &Cli,
        file: FileConfig,
        home_data_dir: impl FnOnce() -> Result<PathBuf, ConfigError>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match cli.data_dir.clone().or(file.database.data_dir) {
            Some(dir) => dir,
            None => home_data_dir()?,
        };
        let database = cli
            .database
            .clone()
            .or(file.database.name)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        if database.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseName);
        }

        let export_dir = cli
            .export_dir
            .clone()
            .or(file.export.directory)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_filter = file
            .logging
            .filter
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            connection: ConnectionConfig::new(data_dir, database.trim()),
            export_dir,
            log_filter,
        })
    }
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    database: DatabaseSection,
    export: ExportSection,
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DatabaseSection {
    data_dir: Option<PathBuf>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ExportSection {
    directory: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoggingSection {
    filter: Option<String>,
}

fn load_file(path: &Path, required: bool) -> Result<FileConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            Ok(FileConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
