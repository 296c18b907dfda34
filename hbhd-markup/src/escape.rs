//! Backslash escapes for markup tokens.
//!
//! Escaping is an explicit pass on each side of the inline rules rather than
//! regex lookbehind. [`shield_escapes`] rewrites every escaped token into a
//! private-use placeholder character that no rule pattern can match, then
//! [`unshield`] writes the bare token back once every rule has run. The
//! placeholder stands for the backslash and token together, so the escaping
//! backslash disappears in that last step.
//!
//! Backslashes directly in front of a token pair up: `\\` is one literal
//! backslash and cannot escape anything. An odd run leaves its final
//! backslash to escape the token.
//!
//! Source text may already contain the placeholder code points. Each of those
//! is prefixed with a literal marker on the way in and written back unchanged on
//! the way out, so only placeholders made by this module become tokens.
use std::iter;

/// Tokens a backslash can escape.
pub const ESCAPABLE_TOKENS: [char; 6] = ['#', '@', '>', ';', '*', '`'];

const BACKSLASH: char = '\\';

// Placeholder for every character that may need hiding from the inline rules.
// Link brackets are only ever shielded inside code spans.
const SHIELDS: [(char, char); 8] = [
  ('#', '\u{E000}'),
  ('@', '\u{E001}'),
  ('>', '\u{E002}'),
  (';', '\u{E003}'),
  ('*', '\u{E004}'),
  ('`', '\u{E005}'),
  ('[', '\u{E006}'),
  (']', '\u{E007}'),
];

// Marks the character after it as written by the author.
const LITERAL: char = '\u{E008}';

const fn is_reserved(c: char) -> bool {
  matches!(c, '\u{E000}'..='\u{E008}')
}

fn shield(c: char) -> char {
  SHIELDS
    .iter()
    .find(|(token, _)| *token == c)
    .map_or(c, |&(_, placeholder)| placeholder)
}

fn unshield_char(c: char) -> char {
  SHIELDS
    .iter()
    .find(|(_, placeholder)| *placeholder == c)
    .map_or(c, |&(token, _)| token)
}

/// First pass: replace escaped tokens with placeholders.
///
/// Backslash runs that do not precede a token are left alone.
pub fn shield_escapes(line: &str) -> String {
  let mut out = String::with_capacity(line.len());
  let mut backslashes = 0usize;

  for c in line.chars() {
    if c == BACKSLASH {
      backslashes += 1;
      continue;
    }

    if is_reserved(c) {
      out.extend(iter::repeat_n(BACKSLASH, backslashes));
      out.push(LITERAL);
      out.push(c);
    } else if backslashes > 0 && ESCAPABLE_TOKENS.contains(&c) {
      out.extend(iter::repeat_n(BACKSLASH, backslashes / 2));
      if backslashes.is_multiple_of(2) {
        out.push(c);
      } else {
        out.push(shield(c));
      }
    } else {
      out.extend(iter::repeat_n(BACKSLASH, backslashes));
      out.push(c);
    }
    backslashes = 0;
  }
  out.extend(iter::repeat_n(BACKSLASH, backslashes));

  out
}

/// Hide every rule-significant character in `text` from later rules.
///
/// Used for text that must come out verbatim, such as code span contents.
pub fn shield_text(text: &str) -> String {
  text.chars().map(shield).collect()
}

/// Final pass: turn placeholders back into literal tokens and restore the
/// reserved code points the source already contained.
pub fn unshield(line: &str) -> String {
  let mut out = String::with_capacity(line.len());
  let mut chars = line.chars();
  while let Some(c) = chars.next() {
    if c == LITERAL {
      if let Some(original) = chars.next() {
        out.push(original);
      }
    } else {
      out.push(unshield_char(c));
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn round_trip(line: &str) -> String {
    unshield(&shield_escapes(line))
  }

  #[test]
  fn test_escaped_token_is_hidden() {
    let shielded = shield_escapes(r"\# title");
    assert!(!shielded.contains('#'));
    assert!(!shielded.contains('\\'));
    assert_eq!(unshield(&shielded), "# title");
  }

  #[test]
  fn test_escaped_backslash_does_not_escape() {
    let shielded = shield_escapes(r"\\# title");
    assert_eq!(shielded, r"\# title");
  }

  #[test]
  fn test_odd_run_escapes() {
    let shielded = shield_escapes(r"\\\*");
    assert!(shielded.starts_with('\\'));
    assert!(!shielded.contains('*'));
    assert_eq!(unshield(&shielded), r"\*");
  }

  #[test]
  fn test_backslash_before_other_chars_kept() {
    assert_eq!(round_trip(r"C:\path\to"), r"C:\path\to");
    assert_eq!(round_trip(r"trailing\"), r"trailing\");
    assert_eq!(round_trip(r"\[not a token"), r"\[not a token");
  }

  #[test]
  fn test_every_escapable_token() {
    for token in ESCAPABLE_TOKENS {
      let line = format!("\\{token}");
      let shielded = shield_escapes(&line);
      assert!(!shielded.contains(token), "{token} should be shielded");
      assert_eq!(unshield(&shielded), token.to_string());
    }
  }

  #[test]
  fn test_source_placeholder_chars_survive() {
    for c in '\u{E000}'..='\u{E008}' {
      let line = format!("icon {c} here");
      assert_eq!(round_trip(&line), line, "{c:?} should be kept");
    }
  }

  #[test]
  fn test_source_placeholder_next_to_escape() {
    let line = "\\*\u{E004}\\\u{E004}";
    assert_eq!(round_trip(line), "*\u{E004}\\\u{E004}");
  }

  #[test]
  fn test_shield_text_hides_brackets() {
    let shielded = shield_text("[a](b) *c*");
    assert!(!shielded.contains('['));
    assert!(!shielded.contains('*'));
    assert_eq!(unshield(&shielded), "[a](b) *c*");
  }
}
