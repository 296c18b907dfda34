//! Template path resolution.
//!
//! Templates are named relative to the document that declares them, so
//! `@template: base.html` in `docs/index.hb` refers to `docs/base.html`.
//! Paths are handled as `/`-separated strings, the same form they are
//! written in inside documents.
use crate::error::{ConvertError, ConvertResult};

const SEPARATOR: char = '/';

/// Directory part of `source_path`, up to and including the last `/`.
///
/// A bare file name has an empty directory part.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidPath`] when the path has no file name
/// (empty or ending in `/`) or spans several lines.
pub fn source_dir(source_path: &str) -> ConvertResult<&str> {
  if source_path.is_empty()
    || source_path.ends_with(SEPARATOR)
    || source_path.contains('\n')
  {
    return Err(ConvertError::InvalidPath(source_path.to_string()));
  }

  Ok(
    source_path
      .rfind(SEPARATOR)
      .map_or("", |idx| &source_path[..=idx]),
  )
}

/// Resolve a declared template name against the declaring document.
///
/// Without a source path (in-memory documents) the name is used as is.
///
/// # Errors
///
/// Fails if `source_path` cannot be split, see [`source_dir`].
pub fn resolve_template_path(
  source_path: Option<&str>,
  template: &str,
) -> ConvertResult<String> {
  let dir = source_path.map(source_dir).transpose()?.unwrap_or_default();
  Ok(format!("{dir}{template}"))
}
