//! Configuration management

use crate::types::SyncError;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Command-line interface for mirra
#[derive(Debug, Parser)]
#[command(
    name = "mirra",
    version,
    about = "One-way folder mirroring with rename detection"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Mirror the configured source folders into the destination
    Sync(RunArgs),

    /// Record fingerprints for the source trees without copying anything
    Baseline(RunArgs),
}

/// Options shared by the sync and baseline commands
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source folder to mirror (repeatable; overrides the config file)
    #[arg(short, long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,

    /// Destination root folder (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Snapshot file location
    #[arg(long, value_name = "FILE", default_value = "snapshot.json")]
    pub snapshot: PathBuf,

    /// Append durable events to this log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl RunArgs {
    /// Resolve the effective configuration: the config file (when given)
    /// overlaid with any command-line sources and destination, then
    /// validated.
    pub fn resolve(&self) -> Result<SyncConfiguration, SyncError> {
        let mut config = match &self.config {
            Some(path) => SyncConfiguration::load(path)?,
            None => SyncConfiguration::default(),
        };

        if !self.sources.is_empty() {
            config.source_roots = self.sources.clone();
        }
        if let Some(dest) = &self.dest {
            config.destination_root = dest.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Ordered source roots plus one destination root.
///
/// Consumed read-only by the driver for the duration of one run; each source
/// root lands under `destination_root/basename(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfiguration {
    /// Source folders to mirror, in order
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,

    /// Destination root folder
    #[serde(default)]
    pub destination_root: PathBuf,
}

impl SyncConfiguration {
    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| {
            SyncError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Validate the configuration before a run starts.
    ///
    /// Nothing on disk is touched when validation fails.
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source_roots.is_empty() {
            return Err(SyncError::Config(
                "no source folders configured".to_string(),
            ));
        }

        if self.destination_root.as_os_str().is_empty() {
            return Err(SyncError::Config("no destination folder selected".to_string()));
        }

        for root in &self.source_roots {
            if root.file_name().is_none() {
                return Err(SyncError::Config(format!(
                    "source folder has no final path component: {}",
                    root.display()
                )));
            }
        }

        Ok(())
    }
}
