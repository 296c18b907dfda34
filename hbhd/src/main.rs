use std::{
  fs,
  io::{self, Write},
};

use color_eyre::eyre::{Context, Result, bail};
use hbhd::{
  cli::{Cli, Commands},
  convert::{self, Job},
};
use hbhd_config::Config;
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!(
          "Failed to generate configuration file: {}",
          output.display()
        )
      })?;
      Ok(())
    },

    Commands::Export { output_dir, force } => {
      let written = Config::export_templates(output_dir, *force)
        .wrap_err_with(|| {
          format!("Failed to export templates to {}", output_dir.display())
        })?;
      info!(
        "Exported {} template(s) to {}",
        written.len(),
        output_dir.display()
      );
      Ok(())
    },

    Commands::Convert {
      sources,
      output,
      stdout,
      ..
    } => {
      if output.is_some() && sources.len() > 1 {
        bail!("--output can only be used with a single source document");
      }

      let mut config = Config::load(&cli.config_files, &cli.config_overrides)
        .wrap_err("Failed to load configuration")?;
      cli.merge_into(&mut config);

      let jobs = Job::plan(sources, output.as_deref(), *stdout, &config);
      let printed = convert::convert_all(&config, &jobs)?;

      let mut out = io::stdout().lock();
      for html in printed {
        out.write_all(html.as_bytes())?;
        if !html.ends_with('\n') {
          out.write_all(b"\n")?;
        }
      }
      out.flush()?;
      Ok(())
    },
  }
}
