use std::{io, path::PathBuf};

use hbhd_config::ConfigError;
use hbhd_markup::ConvertError;
use thiserror::Error;

/// Top-level error type for the hbhd crate.
#[derive(Debug, Error)]
pub enum HbhdError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("Failed to convert {}: {source}", path.display())]
  Convert {
    path:   PathBuf,
    #[source]
    source: ConvertError,
  },

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Thread pool error: {0}")]
  ThreadPool(#[from] rayon::ThreadPoolBuildError),

  #[error("{failed} of {total} documents failed to convert")]
  Batch { failed: usize, total: usize },
}
