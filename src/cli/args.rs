//! Command-line argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, ConflictPolicy, StageMode, DEFAULT_CONFIG_FILE};
use crate::fs::Split;

/// Train/val/test image directory tool.
#[derive(Parser, Debug)]
#[command(
    name = "dataset-stager",
    version,
    about = "Bootstrap and stage train/val/test image directories",
    long_about = "Checks that a data root holds train, val and test directories, creates \
                  missing ones, lists image files and stages data from an external \
                  location by copy or symbolic link.\n\n\
                  Without a subcommand, runs the data availability check."
)]
pub struct Args {
    /// Data root holding the train/val/test directories.
    #[arg(short, long, env = "DATASET_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check whether any split holds data (default).
    Check,
    /// Show per-split file counts and sample names.
    Summary {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the image files of a split, sorted.
    List {
        /// Split to list (train, val or test).
        split: Split,
    },
    /// Populate the data root from an external location.
    Stage(StageArgs),
    /// Write the effective configuration to the config file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments of the `stage` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct StageArgs {
    /// External directory to stage from.
    pub source: PathBuf,

    /// Copy the source tree into the data root.
    #[arg(long, conflicts_with = "link")]
    pub copy: bool,

    /// Replace the data root with a symbolic link to the source.
    #[arg(long)]
    pub link: bool,

    /// What to do with files that already exist when copying
    /// (overwrite, skip or error).
    #[arg(long, value_name = "POLICY")]
    pub on_conflict: Option<ConflictPolicy>,

    /// Hide the copy progress bar.
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.data.root = root.clone();
        }

        if let Some(Command::Stage(stage)) = &self.command {
            if stage.copy {
                config.staging.mode = StageMode::Copy;
            } else if stage.link {
                config.staging.mode = StageMode::Link;
            }

            if let Some(policy) = stage.on_conflict {
                config.staging.on_conflict = policy;
            }

            if stage.no_progress {
                config.staging.show_progress = false;
            }
        }
    }
}
