//! Inline markup conversion for a single line.
//!
//! Conversion applies [`INLINE_RULES`] in order, each rule working on the
//! output of the one before it. The order is part of the markup language:
//! comments go first so nothing inside them is converted, and headings go
//! last so they wrap whatever the other rules produced.
use std::sync::LazyLock;

use log::trace;
use regex::{Captures, Regex};

use crate::{escape, utils::compile_or_never};

static COMMENT: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("COMMENT", r"\s*;;.*$"));

static CODE_SPAN: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("CODE_SPAN", r"`([^`]*)`"));

static EMPHASIS: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("EMPHASIS", r"\*([^*]*)\*"));

static LINK: LazyLock<Regex> = LazyLock::new(|| {
  compile_or_never("LINK", r"\[([^\]]+)\]\(([^)]+)\)")
});

static HEADING: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("HEADING", r"^\s*(#+)\s*(.*)$"));

/// A single inline substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineRule {
  /// `text ;; note` becomes `text`, dropping the whitespace before `;;`.
  Comment,
  /// `` `text` `` becomes `<code>text</code>`; the text is kept verbatim and
  /// hidden from every later rule.
  CodeSpan,
  /// `*text*` becomes `<em>text</em>`.
  Emphasis,
  /// `[label](target)` becomes `<a href="target">label</a>`.
  Link,
  /// `## text` becomes `<h2>text</h2>`, the level being the number of `#`.
  /// Replaces the whole line.
  Heading,
}

/// Inline rules in the order they are applied.
///
/// Reordering this changes the output of the converter.
pub const INLINE_RULES: [InlineRule; 5] = [
  InlineRule::Comment,
  InlineRule::CodeSpan,
  InlineRule::Emphasis,
  InlineRule::Link,
  InlineRule::Heading,
];

impl InlineRule {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Comment => "comment",
      Self::CodeSpan => "code-span",
      Self::Emphasis => "emphasis",
      Self::Link => "link",
      Self::Heading => "heading",
    }
  }

  fn pattern(self) -> &'static Regex {
    match self {
      Self::Comment => &COMMENT,
      Self::CodeSpan => &CODE_SPAN,
      Self::Emphasis => &EMPHASIS,
      Self::Link => &LINK,
      Self::Heading => &HEADING,
    }
  }

  /// Apply this rule to every match in `line`.
  ///
  /// Escaped tokens must already be shielded, see [`convert_inline`].
  #[must_use]
  pub fn apply(self, line: &str) -> String {
    let pattern = self.pattern();
    match self {
      Self::Comment => pattern.replace_all(line, "").into_owned(),
      Self::CodeSpan => {
        pattern
          .replace_all(line, |caps: &Captures| {
            format!("<code>{}</code>", escape::shield_text(&caps[1]))
          })
          .into_owned()
      },
      Self::Emphasis => pattern.replace_all(line, "<em>$1</em>").into_owned(),
      Self::Link => {
        pattern
          .replace_all(line, r#"<a href="$2">$1</a>"#)
          .into_owned()
      },
      Self::Heading => {
        pattern
          .replace(line, |caps: &Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
          })
          .into_owned()
      },
    }
  }
}

/// Convert the inline markup of a single line to HTML.
///
/// Tokens escaped with a backslash are left alone by every rule and the
/// escaping backslash is removed from the result. Lines without markup come
/// back unchanged.
#[must_use]
pub fn convert_inline(line: &str) -> String {
  let shielded = escape::shield_escapes(line);
  let converted = INLINE_RULES.iter().fold(shielded, |acc, rule| {
    let next = rule.apply(&acc);
    if next != acc {
      trace!("{} rule rewrote line: {next:?}", rule.name());
    }
    next
  });
  escape::unshield(&converted)
}
