//! The conversion pipeline.
//!
//! A run goes through the same steps every time, in order:
//!
//! 1. paragraph tagging over the raw lines
//! 2. a line scan that records variable declarations and converts every other
//!    line's inline markup
//! 3. filtering out lines that ended up empty
//! 4. templating: joining what is left into the content and merging it into
//!    the declared template
//!
//! Each run owns its variables, so one [`Converter`] can be shared across
//! threads converting different documents.
use log::{debug, trace};

use crate::{
  error::{ConvertError, ConvertResult},
  inline::convert_inline,
  keywords::{Clock, SystemClock, expand_keywords},
  paragraph::add_paragraph_tags,
  path::resolve_template_path,
  template::{TemplateSource, merge, merge_context},
  types::Variables,
  variables::parse_variable_line,
};

/// Separator used to join content lines unless configured otherwise.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// A converted document before template merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
  /// Converted body, the surviving lines joined by the line separator.
  pub content:   String,
  /// Every variable declared in the source, keywords expanded.
  pub variables: Variables,
}

/// Converts markup documents to HTML.
#[derive(Debug, Clone)]
pub struct Converter<C = SystemClock> {
  clock:          C,
  line_separator: String,
}

impl Default for Converter<SystemClock> {
  fn default() -> Self {
    Self::new()
  }
}

impl Converter<SystemClock> {
  /// A converter reading the system clock.
  #[must_use]
  pub fn new() -> Self {
    Self::with_clock(SystemClock)
  }
}

impl<C: Clock> Converter<C> {
  /// A converter reading time keywords from `clock`.
  #[must_use]
  pub fn with_clock(clock: C) -> Self {
    Self {
      clock,
      line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
    }
  }

  /// Join content lines with `separator` instead of `\n`.
  #[must_use]
  pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
    self.line_separator = separator.into();
    self
  }

  /// Run every step short of templating.
  #[must_use]
  pub fn render<S: AsRef<str>>(&self, lines: &[S]) -> Document {
    let tagged = add_paragraph_tags(lines);
    debug!(
      "Tagged {} source lines into {} lines",
      lines.len(),
      tagged.len()
    );

    let mut variables = Variables::new();
    let scanned: Vec<String> = tagged
      .iter()
      .map(|line| self.scan_line(line, &mut variables))
      .collect();
    debug!("Collected {} variables", variables.len());

    let kept: Vec<String> =
      scanned.into_iter().filter(|line| !line.is_empty()).collect();
    debug!("Kept {} content lines", kept.len());

    Document {
      content: kept.join(&self.line_separator),
      variables,
    }
  }

  /// Convert a document and merge it into its declared template.
  ///
  /// `source_path` is where the document was read from; the declared
  /// template is resolved relative to its directory. Pass [`None`] for
  /// documents that do not live on disk.
  ///
  /// # Errors
  ///
  /// - [`ConvertError::MissingTemplate`] if the document declares no
  ///   template.
  /// - [`ConvertError::InvalidPath`] if `source_path` has no directory/file
  ///   form.
  /// - [`ConvertError::Template`] if `templates` cannot load the template.
  pub fn convert<S, T>(
    &self,
    lines: &[S],
    source_path: Option<&str>,
    templates: &T,
  ) -> ConvertResult<String>
  where
    S: AsRef<str>,
    T: TemplateSource + ?Sized,
  {
    let document = self.render(lines);
    let template_name = document
      .variables
      .template()
      .ok_or(ConvertError::MissingTemplate)?;

    let path = resolve_template_path(source_path, template_name)?;
    debug!("Loading template {path}");
    let template = templates.load(&path).map_err(|source| {
      ConvertError::Template {
        path: path.clone(),
        source,
      }
    })?;

    let context = merge_context(&document.variables, &document.content)?;
    Ok(merge(&template, &context))
  }

  /// Record a declaration and return nothing, or convert the line.
  fn scan_line(&self, line: &str, variables: &mut Variables) -> String {
    if let Some(mut variable) = parse_variable_line(line) {
      variable.value = expand_keywords(&variable.value, &self.clock);
      trace!("@{} = {:?}", variable.name, variable.value);
      if let Some(previous) = variables.record(variable) {
        trace!("Replaced earlier value {previous:?}");
      }
      return String::new();
    }
    convert_inline(line)
  }
}
