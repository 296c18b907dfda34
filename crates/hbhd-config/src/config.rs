use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILENAMES: [&str; 5] = [
  "hbhd.toml",
  "hbhd.json",
  ".hbhd.toml",
  ".hbhd.json",
  ".config/hbhd.toml",
];

/// Configuration for hbhd.
///
/// Fields are loaded from a TOML or JSON config file and can be overridden
/// with `--config KEY=VALUE` or the matching CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
  /// Directory converted files are written to. Next to the source if unset.
  pub output_dir: Option<PathBuf>,

  /// Extension given to converted files.
  pub output_extension: String,

  /// String joining converted lines into the document content.
  pub line_separator: String,

  /// Number of documents converted in parallel.
  pub jobs: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      output_dir:       None,
      output_extension: "html".to_string(),
      line_separator:   "\n".to_string(),
      jobs:             None,
    }
  }
}

/// The keys one config file actually sets.
///
/// Files are read into layers rather than straight into [`Config`] so that a
/// key a file leaves out does not reset a value an earlier file set.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ConfigLayer {
  pub output_dir:       Option<PathBuf>,
  pub output_extension: Option<String>,
  pub line_separator:   Option<String>,
  pub jobs:             Option<usize>,
}

impl ConfigLayer {
  /// Read the keys set in a TOML or JSON config file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has no or an unknown
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file {}: {e}",
        path.display()
      ))
    })?;

    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .ok_or_else(|| {
        ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        ))
      })?;

    match extension.as_str() {
      "json" => Ok(serde_json::from_str(&content)?),
      "toml" => Ok(toml::from_str(&content)?),
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has no or an unknown
  /// extension, or fails to parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let mut config = Self::default();
    config.merge(ConfigLayer::from_file(path)?);
    Ok(config)
  }

  /// Load configuration from explicit files, a discovered file or defaults,
  /// then apply `KEY=VALUE` overrides.
  ///
  /// Explicit files are merged in order, later files taking precedence.
  ///
  /// # Errors
  ///
  /// Returns an error if any config file fails to load or an override is
  /// invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if config_files.is_empty() {
      if let Some(discovered_config) = Self::find_config_file() {
        log::info!(
          "Using discovered config file: {}",
          discovered_config.display()
        );
        Self::from_file(&discovered_config)?
      } else {
        Self::default()
      }
    } else {
      let mut merged_config = Self::default();
      for config_path in config_files {
        merged_config.merge(ConfigLayer::from_file(config_path)?);
      }
      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged_config
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Overlay the keys set in `layer`; keys it leaves out keep their
  /// current value.
  pub fn merge(&mut self, layer: ConfigLayer) {
    if let Some(output_dir) = layer.output_dir {
      self.output_dir = Some(output_dir);
    }
    if let Some(output_extension) = layer.output_extension {
      self.output_extension = output_extension;
    }
    if let Some(line_separator) = layer.line_separator {
      self.line_separator = line_separator;
    }
    self.jobs = layer.jobs.or(self.jobs);
  }

  /// Apply configuration overrides from `KEY=VALUE` strings.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not in `KEY=VALUE` form, names an
  /// unknown key, or has a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override. Empty values clear optional fields.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys or unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "output_dir" => {
        self.output_dir =
          (!value.is_empty()).then(|| PathBuf::from(value));
      },
      "output_extension" => {
        value.trim_start_matches('.').clone_into(&mut self.output_extension);
      },
      "line_separator" => self.line_separator = unescape(value),
      "jobs" => {
        self.jobs = if value.is_empty() {
          None
        } else {
          Some(value.parse().map_err(|e| {
            ConfigError::Config(format!(
              "Invalid value for 'jobs': '{value}': {e}"
            ))
          })?)
        };
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'"
        )));
      },
    }

    log::debug!("Applied config override {key}={value}");
    Ok(())
  }

  /// Where the converted form of `source` is written.
  #[must_use]
  pub fn output_path_for(&self, source: &Path) -> PathBuf {
    let converted = source.with_extension(&self.output_extension);
    match &self.output_dir {
      Some(dir) => {
        converted
          .file_name()
          .map_or_else(|| converted.clone(), |name| dir.join(name))
      },
      None => converted,
    }
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let current_dir = std::env::current_dir().ok()?;
        if let Some(found) = Self::find_config_file_in(&current_dir) {
          return Some(found);
        }

        let xdg_config_home = std::env::var("XDG_CONFIG_HOME").ok()?;
        let xdg_config_dir = PathBuf::from(xdg_config_home);
        ["hbhd.toml", "hbhd.json"]
          .iter()
          .map(|filename| xdg_config_dir.join(filename))
          .find(|path| path.exists())
      })
      .clone()
  }

  /// Look for a config file with one of the standard names in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.exists())
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unknown or the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export embedded templates to a directory for customization.
  ///
  /// Existing files are skipped unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the directory cannot be created or a template cannot
  /// be written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
  ) -> Result<Vec<PathBuf>, ConfigError> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to create template directory: {}: {}",
        output_dir.display(),
        e
      ))
    })?;

    let mut written = Vec::new();
    for (filename, content) in hbhd_templates::all_templates() {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write template file: {}: {}",
          file_path.display(),
          e
        ))
      })?;
      log::info!("Exported template: {}", file_path.display());
      written.push(file_path);
    }

    Ok(written)
  }
}

/// Turn `\n`, `\t` and `\\` sequences typed on a command line into the
/// characters they name.
fn unescape(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  let mut chars = value.chars();
  while let Some(c) = chars.next() {
    if c != '\\' {
      out.push(c);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some('r') => out.push('\r'),
      Some('\\') => out.push('\\'),
      Some(other) => {
        out.push('\\');
        out.push(other);
      },
      None => out.push('\\'),
    }
  }
  out
}
