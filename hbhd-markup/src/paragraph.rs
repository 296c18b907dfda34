use crate::classify::is_paragraph_line;

/// Line emitted before a run of paragraph lines.
pub const PARAGRAPH_OPEN: &str = "<p>";

/// Line emitted after a run of paragraph lines.
pub const PARAGRAPH_CLOSE: &str = "</p>";

/// Wrap every maximal run of paragraph lines in [`PARAGRAPH_OPEN`] and
/// [`PARAGRAPH_CLOSE`] lines.
///
/// Special lines (see [`crate::classify`]) pass through untouched and end the
/// current run. The markers are separate lines, so a run of `n` lines grows
/// to `n + 2`.
#[must_use]
pub fn add_paragraph_tags<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
  let eligible: Vec<bool> = lines
    .iter()
    .map(|line| is_paragraph_line(line.as_ref()))
    .collect();

  let mut tagged = Vec::with_capacity(lines.len() + 2);
  for (idx, (line, &is_paragraph)) in lines.iter().zip(&eligible).enumerate() {
    let line = line.as_ref();
    if !is_paragraph {
      tagged.push(line.to_owned());
      continue;
    }

    let previous = idx
      .checked_sub(1)
      .and_then(|prev| eligible.get(prev))
      .copied()
      .unwrap_or(false);
    let next = eligible.get(idx + 1).copied().unwrap_or(false);

    if !previous {
      tagged.push(PARAGRAPH_OPEN.to_owned());
    }
    tagged.push(line.to_owned());
    if !next {
      tagged.push(PARAGRAPH_CLOSE.to_owned());
    }
  }

  tagged
}

#[cfg(test)]
mod tests {
  use super::*;

  fn count(lines: &[String], marker: &str) -> usize {
    lines.iter().filter(|line| *line == marker).count()
  }

  #[test]
  fn test_single_line_run() {
    assert_eq!(add_paragraph_tags(&["Only line"]), vec![
      "<p>",
      "Only line",
      "</p>"
    ]);
  }

  #[test]
  fn test_multi_paragraphs() {
    let source = [
      "@template: base.html",
      "",
      "This is the first paragraph.",
      "Part of first paragraph.",
      "",
      "Second paragraph here.",
      "More of second paragraph",
    ];
    assert_eq!(add_paragraph_tags(&source), vec![
      "@template: base.html",
      "",
      "<p>",
      "This is the first paragraph.",
      "Part of first paragraph.",
      "</p>",
      "",
      "<p>",
      "Second paragraph here.",
      "More of second paragraph",
      "</p>",
    ]);
  }

  #[test]
  fn test_special_lines_split_runs() {
    let source = [
      "This is some text.",
      "#Test heading",
      "##     This is a subheading",
      "This is some text.",
      "#### Heading",
      "More text...",
      "And more.",
    ];
    let tagged = add_paragraph_tags(&source);
    assert_eq!(count(&tagged, PARAGRAPH_OPEN), 3);
    assert_eq!(count(&tagged, PARAGRAPH_CLOSE), 3);
    assert_eq!(&tagged[..3], ["<p>", "This is some text.", "</p>"]);
    assert_eq!(&tagged[tagged.len() - 4..], [
      "<p>",
      "More text...",
      "And more.",
      "</p>"
    ]);
  }

  #[test]
  fn test_last_line_closes_by_position() {
    // The final line repeats an earlier one; closing depends on position.
    let source = ["same", "", "same"];
    assert_eq!(add_paragraph_tags(&source), vec![
      "<p>", "same", "</p>", "", "<p>", "same", "</p>"
    ]);
  }

  #[test]
  fn test_no_paragraph_lines() {
    let source = ["# Title", "", "@x: y", ";; note"];
    assert_eq!(add_paragraph_tags(&source), source.to_vec());
    assert!(add_paragraph_tags::<&str>(&[]).is_empty());
  }

  /// Every sequence of up to six lines drawn from one line of each kind.
  fn all_sequences() -> Vec<Vec<&'static str>> {
    const KINDS: [&str; 6] = ["text", "", "# h", "@x: y", "> q", ";; c"];
    let mut sequences = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..6 {
      frontier = frontier
        .iter()
        .flat_map(|prefix: &Vec<&str>| {
          KINDS.into_iter().map(move |kind| {
            let mut next = prefix.clone();
            next.push(kind);
            next
          })
        })
        .collect();
      sequences.extend(frontier.iter().cloned());
    }
    sequences
  }

  #[test]
  fn test_pairs_match_runs_for_all_short_sequences() {
    for source in all_sequences() {
      let runs = source
        .iter()
        .enumerate()
        .filter(|&(idx, line)| {
          is_paragraph_line(line)
            && (idx == 0 || !is_paragraph_line(source[idx - 1]))
        })
        .count();
      let tagged = add_paragraph_tags(&source);

      assert_eq!(count(&tagged, PARAGRAPH_OPEN), runs, "{source:?}");
      assert_eq!(count(&tagged, PARAGRAPH_CLOSE), runs, "{source:?}");
      assert_eq!(tagged.len(), source.len() + 2 * runs, "{source:?}");

      // Stripping the markers gives back the source, and every paragraph
      // line sits between an open and its close.
      let mut open = false;
      let mut stripped = Vec::new();
      for line in &tagged {
        match line.as_str() {
          PARAGRAPH_OPEN => {
            assert!(!open, "nested open in {source:?}");
            open = true;
          },
          PARAGRAPH_CLOSE => {
            assert!(open, "unmatched close in {source:?}");
            open = false;
          },
          other => {
            assert_eq!(is_paragraph_line(other), open, "{source:?}");
            stripped.push(other);
          },
        }
      }
      assert!(!open, "unclosed run in {source:?}");
      assert_eq!(stripped, source);
    }
  }

  #[test]
  fn test_one_pair_per_run() {
    let source = ["a", "b", "", "c", "> q", "d", "e", "f", "# h", "g"];
    let tagged = add_paragraph_tags(&source);
    // Runs: [a b], [c], [d e f], [g]
    assert_eq!(count(&tagged, PARAGRAPH_OPEN), 4);
    assert_eq!(count(&tagged, PARAGRAPH_CLOSE), 4);
    assert_eq!(tagged.len(), source.len() + 8);
  }
}
