use log::error;
use regex::Regex;

/// Compile a static pattern, logging and falling back to a regex that never
/// matches if compilation fails.
pub fn compile_or_never(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    error!("Failed to compile {name} regex: {e}");
    never_matching_regex()
  })
}

/// Create a regex that never matches anything
///
/// This is used as a fallback pattern when a regex fails to compile.
/// It will never match any input, which is safer than using a trivial regex
/// like `^$` which would match empty strings.
#[allow(
  clippy::expect_used,
  reason = "The pattern is a constant that always compiles"
)]
#[must_use]
pub fn never_matching_regex() -> Regex {
  // Asserts something impossible: a character that is neither whitespace nor
  // non-whitespace.
  Regex::new(r"[^\s\S]").expect("Failed to compile never-matching regex")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn never_matching_regex_rejects_everything() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match(" "));
    assert!(!re.is_match("anything at all"));
  }

  #[test]
  fn compile_or_never_falls_back_on_bad_pattern() {
    let re = compile_or_never("BROKEN", "(unclosed");
    assert!(!re.is_match("(unclosed"));

    let ok = compile_or_never("DIGITS", r"\d+");
    assert!(ok.is_match("42"));
  }
}
