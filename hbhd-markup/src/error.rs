use std::io;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that abort a conversion run.
///
/// None of these produce partial output. Unmatched placeholders and lines
/// without applicable markup are not errors.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
  /// The document never declared `@template: ...`.
  #[error("Configuration error: no template declared (add '@template: <file>')")]
  MissingTemplate,

  /// The source path has no directory/file form.
  #[error("Invalid path: {0:?}")]
  InvalidPath(String),

  /// The template could not be read.
  #[error("Failed to read template {path}: {source}")]
  Template {
    path:   String,
    #[source]
    source: io::Error,
  },
}

impl ConvertError {
  /// Whether this is the missing template configuration error.
  #[must_use]
  pub const fn is_missing_template(&self) -> bool {
    matches!(self, Self::MissingTemplate)
  }
}
