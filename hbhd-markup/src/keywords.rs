//! Keyword expansion for variable values.
//!
//! After a declaration is parsed, its value goes through every entry of
//! [`KEYWORDS`]. Each keyword is a call-like token such as
//! `TIME(%Y-%m-%d)` that gets replaced in place; the rest of the value is
//! kept as written.
//!
//! Time-dependent keywords read the current time from a [`Clock`], so tests
//! and reproducible builds can pin it with [`FixedClock`].
use std::sync::LazyLock;

use jiff::{Zoned, fmt::strtime};
use log::warn;
use regex::{Captures, Regex};

use crate::utils::compile_or_never;

static TIME_KEYWORD: LazyLock<Regex> =
  LazyLock::new(|| compile_or_never("TIME_KEYWORD", r"TIME\(([^)]*)\)"));

/// Source of the current time for keyword expansion.
pub trait Clock {
  fn now(&self) -> Zoned;
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Zoned {
    Zoned::now()
  }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(Zoned);

impl FixedClock {
  #[must_use]
  pub const fn new(at: Zoned) -> Self {
    Self(at)
  }
}

impl Clock for FixedClock {
  fn now(&self) -> Zoned {
    self.0.clone()
  }
}

/// Keywords recognized inside variable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
  /// `TIME(<format>)`: the current local time, formatted with strftime-style
  /// directives.
  Time,
}

/// Keywords in the order they are expanded.
pub const KEYWORDS: [Keyword; 1] = [Keyword::Time];

impl Keyword {
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Time => "TIME",
    }
  }

  fn pattern(self) -> &'static Regex {
    match self {
      Self::Time => &TIME_KEYWORD,
    }
  }

  /// Replace every occurrence of this keyword in `value`.
  #[must_use]
  pub fn expand<C: Clock + ?Sized>(self, value: &str, clock: &C) -> String {
    self
      .pattern()
      .replace_all(value, |caps: &Captures| {
        match self {
          Self::Time => {
            format_time(&caps[1], clock)
              .unwrap_or_else(|| caps[0].to_string())
          },
        }
      })
      .into_owned()
  }
}

fn format_time<C: Clock + ?Sized>(format: &str, clock: &C) -> Option<String> {
  let now = clock.now();
  match strtime::format(format, &now) {
    Ok(formatted) => Some(formatted),
    Err(e) => {
      warn!("Leaving TIME({format}) unexpanded: {e}");
      None
    },
  }
}

/// Expand every keyword in `value`.
#[must_use]
pub fn expand_keywords<C: Clock + ?Sized>(value: &str, clock: &C) -> String {
  KEYWORDS
    .iter()
    .fold(value.to_owned(), |acc, keyword| keyword.expand(&acc, clock))
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  fn fixed() -> FixedClock {
    let at: Zoned = "2024-03-09T14:05:00[UTC]".parse().expect("valid timestamp");
    FixedClock::new(at)
  }

  #[test]
  fn test_time_keyword_is_replaced_in_place() {
    assert_eq!(
      expand_keywords("Updated TIME(%Y-%m-%d) by Jo", &fixed()),
      "Updated 2024-03-09 by Jo"
    );
  }

  #[test]
  fn test_time_keyword_whole_value() {
    assert_eq!(expand_keywords("TIME(%H:%M)", &fixed()), "14:05");
  }

  #[test]
  fn test_multiple_time_keywords() {
    assert_eq!(
      expand_keywords("TIME(%Y) / TIME(%m)", &fixed()),
      "2024 / 03"
    );
  }

  #[test]
  fn test_value_without_keywords_unchanged() {
    assert_eq!(expand_keywords("plain value", &fixed()), "plain value");
    assert_eq!(expand_keywords("TIME without call", &fixed()), "TIME without call");
  }

  #[test]
  fn test_invalid_format_left_verbatim() {
    // A trailing lone `%` is not a valid directive.
    assert_eq!(expand_keywords("TIME(%)", &fixed()), "TIME(%)");
  }

  #[test]
  fn test_fixed_clock_is_stable() {
    let clock = fixed();
    assert_eq!(clock.now(), clock.now());
    assert_eq!(Keyword::Time.name(), "TIME");
  }
}
