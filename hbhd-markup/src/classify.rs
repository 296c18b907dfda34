//! Line classification for paragraph wrapping.
//!
//! A line takes part in paragraph wrapping unless, once surrounding whitespace
//! is trimmed, it is blank or starts with one of the [`SpecialMarker`]
//! prefixes.

/// Line prefixes that keep a line out of paragraph wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMarker {
  /// An empty or whitespace-only line.
  Blank,
  /// `#`
  Heading,
  /// `@`
  Variable,
  /// `>`
  Blockquote,
  /// `;;`
  Comment,
}

impl SpecialMarker {
  /// Every marker, in the order they are checked.
  pub const ALL: [Self; 5] = [
    Self::Blank,
    Self::Heading,
    Self::Variable,
    Self::Blockquote,
    Self::Comment,
  ];

  /// Literal prefix for this marker. Empty for [`SpecialMarker::Blank`].
  #[must_use]
  pub const fn prefix(self) -> &'static str {
    match self {
      Self::Blank => "",
      Self::Heading => "#",
      Self::Variable => "@",
      Self::Blockquote => ">",
      Self::Comment => ";;",
    }
  }

  /// Check an already trimmed line against this marker.
  ///
  /// The blank marker has no prefix to look for, so it only matches by
  /// equality; every string starts with the empty string.
  #[must_use]
  pub fn matches(self, trimmed: &str) -> bool {
    let prefix = self.prefix();
    if prefix.is_empty() {
      trimmed.is_empty()
    } else {
      trimmed == prefix || trimmed.starts_with(prefix)
    }
  }
}

/// Find the first marker from `markers` that applies to `line`.
#[must_use]
pub fn special_marker(
  line: &str,
  markers: &[SpecialMarker],
) -> Option<SpecialMarker> {
  let trimmed = line.trim();
  markers.iter().copied().find(|marker| marker.matches(trimmed))
}

/// Whether `line` takes part in paragraph wrapping.
#[must_use]
pub fn is_paragraph_line(line: &str) -> bool {
  is_paragraph_line_with(line, &SpecialMarker::ALL)
}

/// Like [`is_paragraph_line`], checked against a custom marker table.
#[must_use]
pub fn is_paragraph_line_with(line: &str, markers: &[SpecialMarker]) -> bool {
  special_marker(line, markers).is_none()
}
