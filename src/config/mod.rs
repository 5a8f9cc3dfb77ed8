//! Configuration management

use crate::types::MirrorError;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Wait between passes when neither the CLI nor a config file sets one
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// Command-line interface
#[derive(Debug, Parser)]
#[command(
    name = "treemirror",
    version,
    about = "One way synchronization of files from source to destination"
)]
pub struct Cli {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Sync interval in seconds [default: 10]
    #[arg(short = 'i', long = "interval", value_name = "SECONDS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Log file path (logs go to standard output when omitted)
    #[arg(short = 'l', long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// TOML file with default settings; command-line flags take precedence
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exclude paths matching this glob (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Log what would be copied without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Run a single pass and exit
    #[arg(long = "once")]
    pub once: bool,
}

/// Settings accepted from a `--config` TOML file
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub interval_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub debug: Option<bool>,
    #[serde(default)]
    pub exclude: Vec<String>,
    pub dry_run: Option<bool>,
}

impl FileConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, MirrorError> {
        let text = fs::read_to_string(path).map_err(|e| {
            MirrorError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&text).map_err(|e| {
            MirrorError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory
    pub destination: PathBuf,

    /// Wait between passes
    pub interval: Duration,

    /// Log file (None = standard output)
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    pub debug: bool,

    /// Exclude globs applied to both trees
    pub exclude: Vec<String>,

    /// Plan and log only
    pub dry_run: bool,

    /// Single pass then exit
    pub once: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            log_file: None,
            debug: false,
            exclude: Vec::new(),
            dry_run: false,
            once: false,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = MirrorError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Config::merge(cli, file)
    }
}

impl Config {
    /// Combine CLI flags with file settings, CLI first
    pub fn merge(cli: Cli, file: FileConfig) -> Result<Self, MirrorError> {
        let interval_secs = cli
            .interval
            .or(file.interval_secs)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(MirrorError::Config(
                "Sync interval must be a positive number of seconds".to_string(),
            ));
        }

        let mut exclude = file.exclude;
        exclude.extend(cli.exclude);

        Ok(Self {
            source: cli.source,
            destination: cli.destination,
            interval: Duration::from_secs(interval_secs),
            log_file: cli.log_file.or(file.log_file),
            debug: cli.debug || file.debug.unwrap_or(false),
            exclude,
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            once: cli.once,
        })
    }

    /// Check the source and destination before the first pass
    ///
    /// The source must be an existing directory. The destination must not be
    /// the source or live inside it; it is created when missing.
    pub fn validate(&self) -> Result<(), MirrorError> {
        let source_meta =
            fs::metadata(&self.source).map_err(|e| MirrorError::from_io(&self.source, e))?;
        if !source_meta.is_dir() {
            return Err(MirrorError::NotADirectory {
                path: self.source.clone(),
            });
        }

        let source = resolve_lenient(&self.source)?;
        let destination = resolve_lenient(&self.destination)?;

        if source == destination {
            return Err(MirrorError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }
        if destination.starts_with(&source) {
            return Err(MirrorError::Config(format!(
                "Destination {} is inside source {}",
                self.destination.display(),
                self.source.display()
            )));
        }

        match fs::metadata(&self.destination) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(MirrorError::NotADirectory {
                path: self.destination.clone(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if !self.dry_run {
                    fs::create_dir_all(&self.destination)
                        .map_err(|e| MirrorError::from_io(&self.destination, e))?;
                    tracing::info!("Created destination {}", self.destination.display());
                }
                Ok(())
            }
            Err(e) => Err(MirrorError::from_io(&self.destination, e)),
        }
    }
}

/// Canonicalize the longest existing prefix of `path` and append the rest
fn resolve_lenient(path: &Path) -> Result<PathBuf, MirrorError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut missing: Vec<&OsStr> = Vec::new();
    let mut existing = absolute.as_path();
    loop {
        if let Ok(mut resolved) = existing.canonicalize() {
            for name in missing.iter().rev() {
                resolved.push(name);
            }
            return Ok(resolved);
        }
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }
}
