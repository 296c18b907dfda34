//! # hbhd-markup - line-oriented markup to HTML
//!
//! Converts documents written in a small line-based markup language into
//! HTML and merges the result into a user-supplied template.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use hbhd_markup::Converter;
//!
//! let source = [
//!   "@template: base.html",
//!   "@title: Hello",
//!   "# Welcome",
//!   "Some *emphasized* text.",
//! ];
//!
//! let mut templates = HashMap::new();
//! templates.insert(
//!   "base.html".to_string(),
//!   "<title>{{title}}</title>{{content}}".to_string(),
//! );
//!
//! let html = Converter::new()
//!   .convert(&source, None, &templates)
//!   .expect("template is declared and available");
//!
//! assert_eq!(
//!   html,
//!   "<title>Hello</title><h1>Welcome</h1>\n<p>\nSome \
//!    <em>emphasized</em> text.\n</p>"
//! );
//! ```
//!
//! ## Markup
//!
//! - `@name: value` declares a variable, later declarations win
//! - `#`, `##`, ... start a heading
//! - `` `code` ``, `*emphasis*` and `[label](target)` work inline
//! - `;;` starts a comment that runs to the end of the line
//! - a backslash makes the following markup token literal (`\#`, `\*`, ...)
//!
//! Runs of ordinary lines are wrapped in `<p>` and `</p>`.
pub mod classify;
pub mod converter;
pub mod error;
mod escape;
pub mod inline;
pub mod keywords;
pub mod paragraph;
pub mod path;
pub mod template;
mod types;
pub mod utils;
pub mod variables;

pub use crate::{
  classify::{SpecialMarker, is_paragraph_line, is_paragraph_line_with},
  converter::{Converter, Document},
  error::{ConvertError, ConvertResult},
  escape::ESCAPABLE_TOKENS,
  inline::{INLINE_RULES, InlineRule, convert_inline},
  keywords::{Clock, FixedClock, KEYWORDS, Keyword, SystemClock, expand_keywords},
  paragraph::add_paragraph_tags,
  path::{resolve_template_path, source_dir},
  template::{TemplateSource, merge, merge_context},
  types::{CONTENT_KEY, TEMPLATE_KEY, Variable, Variables},
  variables::parse_variable_line,
};
