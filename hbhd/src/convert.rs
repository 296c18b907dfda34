//! File handling around the markup converter: reading sources and templates,
//! converting documents in parallel and writing the results.
use std::{
  ffi::OsString,
  fs,
  io,
  path::{self, Path, PathBuf},
};

use hbhd_config::Config;
use hbhd_markup::{Clock, Converter, TemplateSource};
use log::{debug, error, info};
use rayon::prelude::*;

use crate::error::HbhdError;

/// Reads templates from the directory of the document declaring them.
///
/// The directory is kept as a [`Path`], so native separators and non-UTF-8
/// directory names resolve the same way as the source path itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsTemplates {
  base: PathBuf,
}

impl FsTemplates {
  /// Templates for the document at `source`.
  #[must_use]
  pub fn beside(source: &Path) -> Self {
    Self {
      base: source.parent().map(Path::to_path_buf).unwrap_or_default(),
    }
  }

  /// Where the template declared as `name` is read from: the document's
  /// directory followed by `name` as written.
  #[must_use]
  pub fn resolve(&self, name: &str) -> PathBuf {
    if self.base.as_os_str().is_empty() {
      return PathBuf::from(name);
    }
    let mut joined = OsString::from(self.base.as_os_str());
    joined.push(path::MAIN_SEPARATOR_STR);
    joined.push(name);
    PathBuf::from(joined)
  }
}

impl TemplateSource for FsTemplates {
  fn load(&self, name: &str) -> io::Result<String> {
    let path = self.resolve(name);
    fs::read_to_string(&path).map_err(|e| {
      io::Error::new(e.kind(), format!("{}: {e}", path.display()))
    })
  }
}

/// Where a converted document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
  File(PathBuf),
  Stdout,
}

/// One source document and where its HTML is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
  pub source:      PathBuf,
  pub destination: Destination,
}

impl Job {
  /// Plan jobs for `sources`.
  ///
  /// `output` names the output file and is only honored for a single source;
  /// otherwise each output path comes from [`Config::output_path_for`].
  #[must_use]
  pub fn plan(
    sources: &[PathBuf],
    output: Option<&Path>,
    to_stdout: bool,
    config: &Config,
  ) -> Vec<Self> {
    sources
      .iter()
      .map(|source| {
        let destination = if to_stdout {
          Destination::Stdout
        } else if let Some(output) = output {
          Destination::File(output.to_path_buf())
        } else {
          Destination::File(config.output_path_for(source))
        };
        Self {
          source: source.clone(),
          destination,
        }
      })
      .collect()
  }
}

/// Build a converter from the configuration.
#[must_use]
pub fn converter(config: &Config) -> Converter {
  Converter::new().line_separator(config.line_separator.as_str())
}

/// Read a source document as lines.
///
/// # Errors
///
/// Returns [`HbhdError::Read`] if the file cannot be read.
pub fn read_source(path: &Path) -> Result<Vec<String>, HbhdError> {
  let text = fs::read_to_string(path).map_err(|source| {
    HbhdError::Read {
      path: path.to_path_buf(),
      source,
    }
  })?;
  Ok(text.lines().map(str::to_owned).collect())
}

/// Convert a single file to HTML without writing it anywhere.
///
/// The declared template is read from the source's directory, see
/// [`FsTemplates`].
///
/// # Errors
///
/// Returns an error if the source cannot be read or conversion fails.
pub fn convert_file<C: Clock>(
  converter: &Converter<C>,
  source: &Path,
) -> Result<String, HbhdError> {
  let lines = read_source(source)?;
  converter
    .convert(&lines, None, &FsTemplates::beside(source))
    .map_err(|e| {
      HbhdError::Convert {
        path:   source.to_path_buf(),
        source: e,
      }
    })
}

/// Run a job. Files are written only once conversion fully succeeded;
/// stdout jobs hand their HTML back for the caller to print in order.
fn run_job<C: Clock>(
  converter: &Converter<C>,
  job: &Job,
) -> Result<Option<String>, HbhdError> {
  let html = convert_file(converter, &job.source)?;
  match &job.destination {
    Destination::Stdout => Ok(Some(html)),
    Destination::File(path) => {
      write_output(path, &html)?;
      info!("{} -> {}", job.source.display(), path.display());
      Ok(None)
    },
  }
}

fn write_output(path: &Path, html: &str) -> Result<(), HbhdError> {
  let write_err = |source| {
    HbhdError::Write {
      path: path.to_path_buf(),
      source,
    }
  };
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(write_err)?;
  }
  fs::write(path, html).map_err(write_err)
}

/// Convert every job on a thread pool of `config.jobs` threads (CPU count by
/// default).
///
/// Each document is an independent run; one failing does not stop the
/// others. Returns the HTML of stdout jobs in job order.
///
/// # Errors
///
/// Returns [`HbhdError::Batch`] if any document failed (each failure is
/// logged), or an error if the thread pool cannot be built.
pub fn convert_all(
  config: &Config,
  jobs: &[Job],
) -> Result<Vec<String>, HbhdError> {
  let threads = config.jobs.unwrap_or_else(num_cpus::get).max(1);
  debug!("Converting {} documents on {threads} threads", jobs.len());
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(threads)
    .build()?;

  let converter = converter(config);
  let results: Vec<Result<Option<String>, HbhdError>> = pool.install(|| {
    jobs
      .par_iter()
      .map(|job| run_job(&converter, job))
      .collect()
  });

  let mut printed = Vec::new();
  let mut failed = 0;
  for result in results {
    match result {
      Ok(Some(html)) => printed.push(html),
      Ok(None) => {},
      Err(e) => {
        error!("{e}");
        failed += 1;
      },
    }
  }

  if failed > 0 {
    return Err(HbhdError::Batch {
      failed,
      total: jobs.len(),
    });
  }
  Ok(printed)
}
