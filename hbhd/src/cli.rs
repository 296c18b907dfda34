use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hbhd_config::Config;

/// Command line interface for hbhd
#[derive(Parser, Debug)]
#[command(author, version, about = "hbhd: line-oriented markup to HTML")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the hbhd CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Convert markup documents to HTML using the template each one declares.
  Convert {
    /// Source documents to convert.
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Output file. Only valid with a single source.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory to write converted files to.
    #[arg(short = 'O', long)]
    output_dir: Option<PathBuf>,

    /// Number of documents to convert in parallel.
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    /// Print converted documents instead of writing files.
    #[arg(long, conflicts_with_all = ["output", "output_dir"])]
    stdout: bool,
  },

  /// Initialize a new hbhd configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "hbhd.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the starter template to a directory for customization.
  Export {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Merge CLI arguments into `config`, prioritizing CLI values when present
  pub fn merge_into(&self, config: &mut Config) {
    if let Commands::Convert {
      output_dir, jobs, ..
    } = &self.command
    {
      if let Some(output_dir) = output_dir {
        config.output_dir = Some(output_dir.clone());
      }
      config.jobs = jobs.or(config.jobs);
    }
  }
}
