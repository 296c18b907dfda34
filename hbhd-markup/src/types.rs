//! Variable types shared by the parser, the converter and the merger.
use std::collections::{HashMap, hash_map};

use serde::{Deserialize, Serialize};

/// Variable naming the template a document merges into.
pub const TEMPLATE_KEY: &str = "template";

/// Placeholder key the assembled document body is merged under.
pub const CONTENT_KEY: &str = "content";

/// A single `@name: value` declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variable {
  /// Identifier after the `@`.
  pub name:  String,
  /// Everything after the colon and any whitespace following it.
  pub value: String,
}

/// Variables collected over one conversion run.
///
/// Names are unique; recording a name again replaces its value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Variables {
  values: HashMap<String, String>,
}

impl Variables {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `name` to `value`, returning the value it replaced.
  pub fn set(
    &mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Option<String> {
    self.values.insert(name.into(), value.into())
  }

  /// Record a parsed declaration.
  pub fn record(&mut self, variable: Variable) -> Option<String> {
    self.set(variable.name, variable.value)
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }

  /// The declared template name, if any.
  #[must_use]
  pub fn template(&self) -> Option<&str> {
    self.get(TEMPLATE_KEY)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
    self.values.iter()
  }
}

impl<'a> IntoIterator for &'a Variables {
  type IntoIter = hash_map::Iter<'a, String, String>;
  type Item = (&'a String, &'a String);

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl FromIterator<Variable> for Variables {
  fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
    let mut variables = Self::new();
    for variable in iter {
      variables.record(variable);
    }
    variables
  }
}
