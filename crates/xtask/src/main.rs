use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

const BIN_NAME: &str = "hbhd";

#[derive(Parser)]
#[command(author, version, about)]
struct Xtask {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate shell completions and the manpage for the hbhd CLI
  Dist {
    /// Output directory for generated files.
    #[arg(short, long, default_value = "dist")]
    output_dir: PathBuf,

    /// Only generate shell completions.
    #[arg(long, conflicts_with = "manpage_only")]
    completions_only: bool,

    /// Only generate the manpage.
    #[arg(long, conflicts_with = "completions_only")]
    manpage_only: bool,
  },
}

fn main() -> Result<()> {
  let Commands::Dist {
    output_dir,
    completions_only,
    manpage_only,
  } = Xtask::parse().command;

  if !manpage_only {
    generate_completions(&output_dir)?;
  }
  if !completions_only {
    generate_manpage(&output_dir)?;
  }
  Ok(())
}

fn generate_completions(output_dir: &Path) -> Result<()> {
  let completions_dir = output_dir.join("completions");
  fs::create_dir_all(&completions_dir)?;
  let mut cmd = hbhd::cli::Cli::command();
  for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
    generate_to(shell, &mut cmd, BIN_NAME, &completions_dir).with_context(
      || format!("Failed to generate {shell} completions"),
    )?;
  }
  #[allow(clippy::print_stdout, reason = "Progress output for a dev tool")]
  {
    println!("Shell completions written to {}", completions_dir.display());
  }
  Ok(())
}

fn generate_manpage(output_dir: &Path) -> Result<()> {
  let man_dir = output_dir.join("man");
  fs::create_dir_all(&man_dir)?;
  let file_path = man_dir.join(format!("{BIN_NAME}.1"));
  let mut file = fs::File::create(&file_path).with_context(|| {
    format!("Failed to create manpage file at {}", file_path.display())
  })?;
  Man::new(hbhd::cli::Cli::command())
    .render(&mut file)
    .context("Failed to render manpage")?;
  #[allow(clippy::print_stdout, reason = "Progress output for a dev tool")]
  {
    println!("Manpage written to {}", file_path.display());
  }
  Ok(())
}
