//! CLI argument parsing module for addoncat

use crate::changes::ChangeKind;
use crate::config::{default_config_dir, Config};
use crate::error::ConfigError;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Addon catalog client
#[derive(Parser, Debug, Clone)]
#[command(name = "addoncat", version, about = "Browse the addon catalog and track pending updates")]
pub struct CliArgs {
    /// Catalog base URL
    #[arg(long, env = "ADDONCAT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Directory holding available-updates.cfg and addons_update/
    #[arg(long, env = "ADDONCAT_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - no progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the catalog for the status code of an application version
    Status {
        /// Application version
        version: String,
    },

    /// List the addons offered by the catalog
    Search {
        /// Keyword to search for (not yet supported by the catalog)
        #[arg(long)]
        keyword: Option<String>,
    },

    /// Show the license and dependencies of an addon
    Deps {
        /// Addon id
        id: String,
    },

    /// Show the install file of an addon
    File {
        /// Addon id
        id: String,
    },

    /// List modules with newer versions available
    Updates {
        /// Store the result in the available-updates cache
        #[arg(long)]
        save: bool,

        /// Application version used for the status check when saving
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        app_version: String,
    },

    /// Show the details page of an addon
    Details {
        /// Addon id
        id: String,
    },

    /// Check the cached updates for one module
    Check {
        /// Module id
        module_id: String,

        /// Currently installed version
        current_version: String,
    },

    /// Build a download URL for a catalog file
    Url {
        /// Which kind of file
        #[arg(value_enum)]
        kind: UrlKind,

        /// Path on the catalog server
        path: String,
    },

    /// Inspect or edit the pending-changes log
    Changes {
        #[command(subcommand)]
        action: ChangesAction,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Download,
    License,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ChangesAction {
    /// Print all pending changes
    List,
    /// Queue an addon for installation
    Install { value: String },
    /// Queue an addon for removal
    Remove { value: String },
    /// Queue a file for update
    UpdateFile { value: String },
    /// Queue a file for removal
    RemoveFile { value: String },
    /// Drop a queued entry
    Discard {
        #[arg(value_enum)]
        kind: ChangeKindArg,
        value: String,
    },
    /// Drop all pending changes
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKindArg {
    Install,
    Remove,
    UpdateFile,
    RemoveFile,
}

impl From<ChangeKindArg> for ChangeKind {
    fn from(arg: ChangeKindArg) -> Self {
        match arg {
            ChangeKindArg::Install => ChangeKind::InstallAddon,
            ChangeKindArg::Remove => ChangeKind::RemoveAddon,
            ChangeKindArg::UpdateFile => ChangeKind::UpdateFile,
            ChangeKindArg::RemoveFile => ChangeKind::RemoveFile,
        }
    }
}

impl ChangesAction {
    /// The entry to queue, for actions that add one
    pub fn queued(&self) -> Option<(ChangeKind, &str)> {
        match self {
            ChangesAction::Install { value } => Some((ChangeKind::InstallAddon, value.as_str())),
            ChangesAction::Remove { value } => Some((ChangeKind::RemoveAddon, value.as_str())),
            ChangesAction::UpdateFile { value } => Some((ChangeKind::UpdateFile, value.as_str())),
            ChangesAction::RemoveFile { value } => Some((ChangeKind::RemoveFile, value.as_str())),
            _ => None,
        }
    }
}

impl Command {
    /// Check if this command talks to the remote catalog
    pub fn needs_catalog(&self) -> bool {
        matches!(
            self,
            Command::Status { .. }
                | Command::Search { .. }
                | Command::Deps { .. }
                | Command::File { .. }
                | Command::Updates { .. }
                | Command::Details { .. }
                | Command::Url { .. }
        )
    }
}

impl CliArgs {
    /// Build the runtime configuration from the arguments
    pub fn config(&self) -> Result<Config, ConfigError> {
        let config_dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => default_config_dir()?,
        };
        let config = Config::new(self.base_url.as_deref(), config_dir)?;
        if self.command.needs_catalog() {
            config.base_url()?;
        }
        Ok(config)
    }
}
