use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported. Contains the name
  /// of the unsupported format.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration template in TOML, commented so a new user knows what
/// each field does.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# hbhd configuration file

# Directory converted files are written to. When unset, each output file is
# written next to its source.
# output_dir = "build"

# Extension given to converted files
output_extension = "html"

# String used to join converted lines into the {{content}} placeholder
line_separator = "\n"

# Number of documents converted in parallel (defaults to number of CPU cores)
# jobs = 4
"#;

/// Default configuration template in JSON format.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "output_extension": "html",
  "line_separator": "\n"
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for anything other than
/// `toml` or `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
