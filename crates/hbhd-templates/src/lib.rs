use std::collections::HashMap;

/// Starter page template. Uses the `title`, `author` and `content`
/// placeholders.
pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("base.html", BASE_TEMPLATE);
  templates
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_base_template_placeholders() {
    for placeholder in ["{{title}}", "{{author}}", "{{content}}"] {
      assert!(
        BASE_TEMPLATE.contains(placeholder),
        "base.html should contain {placeholder}"
      );
    }
  }

  #[test]
  fn test_all_templates_lists_base() {
    let templates = all_templates();
    assert_eq!(templates.get("base.html"), Some(&BASE_TEMPLATE));
  }
}
