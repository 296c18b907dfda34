use std::sync::LazyLock;

use regex::Regex;

use crate::{types::Variable, utils::compile_or_never};

/// `@name: value`. Names are word characters; the value is the rest of the
/// line after the colon and any whitespace following it.
static VARIABLE_LINE: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("VARIABLE_LINE", r"^@(\w+):\s*(.*)$"));

/// Parse a variable declaration line.
///
/// Returns [`None`] for anything that is not a declaration, including lines
/// with leading whitespace before the `@`. The value is returned as written;
/// keyword expansion is a separate step (see [`crate::keywords`]).
#[must_use]
pub fn parse_variable_line(line: &str) -> Option<Variable> {
  VARIABLE_LINE.captures(line).map(|caps| {
    Variable {
      name:  caps[1].to_string(),
      value: caps[2].to_string(),
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parsed(line: &str) -> Option<(String, String)> {
    parse_variable_line(line).map(|v| (v.name, v.value))
  }

  #[test]
  fn test_simple_declaration() {
    assert_eq!(
      parsed("@title: Hello"),
      Some(("title".to_string(), "Hello".to_string()))
    );
  }

  #[test]
  fn test_value_kept_verbatim() {
    assert_eq!(
      parsed("@author: /u/keppo"),
      Some(("author".to_string(), "/u/keppo".to_string()))
    );
    assert_eq!(
      parsed("@note:spaced out  "),
      Some(("note".to_string(), "spaced out  ".to_string()))
    );
    assert_eq!(
      parsed("@template: ../examples/base.html"),
      Some(("template".to_string(), "../examples/base.html".to_string()))
    );
  }

  #[test]
  fn test_word_character_names() {
    assert_eq!(
      parsed("@page_title2: x"),
      Some(("page_title2".to_string(), "x".to_string()))
    );
    assert_eq!(
      parsed("@Title: x"),
      Some(("Title".to_string(), "x".to_string()))
    );
  }

  #[test]
  fn test_empty_value() {
    assert_eq!(parsed("@empty:"), Some(("empty".to_string(), String::new())));
  }

  #[test]
  fn test_non_declarations() {
    assert_eq!(parsed("@ title: no"), None);
    assert_eq!(parsed("@title no colon"), None);
    assert_eq!(parsed(" @title: indented"), None);
    assert_eq!(parsed("@: nameless"), None);
    assert_eq!(parsed("@my-name: dashes"), None);
    assert_eq!(parsed("plain text"), None);
  }
}
