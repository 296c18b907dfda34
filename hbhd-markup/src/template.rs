//! Template merging.
//!
//! Templates are plain strings with `{{name}}` placeholders. Merging replaces
//! each placeholder whose name is in the merge context and leaves every other
//! placeholder as written.
use std::{collections::HashMap, io, sync::LazyLock};

use regex::{Captures, Regex};

use crate::{
  error::{ConvertError, ConvertResult},
  types::{CONTENT_KEY, TEMPLATE_KEY, Variables},
  utils::compile_or_never,
};

static PLACEHOLDER: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("PLACEHOLDER", r"\{\{(\w+)\}\}"));

/// Loads template text by resolved path.
///
/// The converter never touches the filesystem itself; callers pass an
/// implementation of this trait instead.
pub trait TemplateSource {
  /// Read the template at `path`.
  ///
  /// # Errors
  ///
  /// Returns the underlying I/O error if the template cannot be read.
  fn load(&self, path: &str) -> io::Result<String>;
}

/// In-memory templates keyed by path.
impl TemplateSource for HashMap<String, String> {
  fn load(&self, path: &str) -> io::Result<String> {
    self.get(path).cloned().ok_or_else(|| {
      io::Error::new(io::ErrorKind::NotFound, format!("no template at {path}"))
    })
  }
}

/// Build the merge context for a run.
///
/// Every variable except `template` is included, and `content` is always set
/// to `content`, replacing any declared variable of that name.
///
/// # Errors
///
/// Returns [`ConvertError::MissingTemplate`] if no template was declared.
pub fn merge_context(
  variables: &Variables,
  content: &str,
) -> ConvertResult<HashMap<String, String>> {
  if variables.template().is_none() {
    return Err(ConvertError::MissingTemplate);
  }

  let mut context: HashMap<String, String> = variables
    .iter()
    .filter(|(name, _)| name.as_str() != TEMPLATE_KEY)
    .map(|(name, value)| (name.clone(), value.clone()))
    .collect();
  context.insert(CONTENT_KEY.to_string(), content.to_string());

  Ok(context)
}

/// Substitute `{{name}}` placeholders in `template`.
///
/// The template is scanned once, so inserted values are never searched for
/// further placeholders.
#[must_use]
pub fn merge(template: &str, context: &HashMap<String, String>) -> String {
  PLACEHOLDER
    .replace_all(template, |caps: &Captures| {
      context
        .get(&caps[1])
        .map_or_else(|| caps[0].to_string(), Clone::clone)
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn context(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
      .collect()
  }

  #[test]
  fn test_merge_content_and_variable() {
    let ctx = context(&[("content", "<p>Hi</p>"), ("author", "Jo")]);
    assert_eq!(
      merge("<html>{{content}}{{author}}</html>", &ctx),
      "<html><p>Hi</p>Jo</html>"
    );
  }

  #[test]
  fn test_unknown_placeholder_left_verbatim() {
    let ctx = context(&[("content", "body")]);
    assert_eq!(
      merge("{{content}} {{missing}}", &ctx),
      "body {{missing}}"
    );
  }

  #[test]
  fn test_repeated_placeholder() {
    let ctx = context(&[("title", "T")]);
    assert_eq!(merge("{{title}}|{{title}}", &ctx), "T|T");
  }

  #[test]
  fn test_values_are_not_rescanned() {
    let ctx = context(&[("author", "{{content}}"), ("content", "body")]);
    assert_eq!(merge("{{author}}/{{content}}", &ctx), "{{content}}/body");
  }

  #[test]
  fn test_placeholders_are_case_sensitive_and_exact() {
    let ctx = context(&[("title", "T")]);
    assert_eq!(
      merge("{{Title}} {{ title }} {title}", &ctx),
      "{{Title}} {{ title }} {title}"
    );
  }

  #[test]
  fn test_merge_context_excludes_template_and_overrides_content() {
    let mut variables = Variables::new();
    variables.set("template", "base.html");
    variables.set("content", "declared");
    variables.set("author", "Jo");

    let ctx = merge_context(&variables, "assembled").expect("template declared");
    assert_eq!(ctx.get("content").map(String::as_str), Some("assembled"));
    assert_eq!(ctx.get("author").map(String::as_str), Some("Jo"));
    assert!(!ctx.contains_key("template"));
    assert_eq!(merge("{{template}}", &ctx), "{{template}}");
  }

  #[test]
  fn test_merge_context_requires_template() {
    let mut variables = Variables::new();
    variables.set("author", "Jo");
    let err = merge_context(&variables, "").expect_err("no template");
    assert!(err.is_missing_template());
  }

  #[test]
  fn test_in_memory_source() {
    let templates = context(&[("base.html", "{{content}}")]);
    assert_eq!(templates.load("base.html").expect("present"), "{{content}}");
    let err = templates.load("other.html").expect_err("absent");
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }
}
