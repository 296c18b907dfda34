pub mod config;
pub mod error;
pub mod templates;

pub use config::{Config, ConfigLayer};
pub use error::ConfigError;
