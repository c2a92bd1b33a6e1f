//! # Configuration Module
//!
//! This module handles loading and parsing of user configuration from a
//! TOML file. The configuration lets users define comment dialects for file
//! types the builtin table does not know, or override the builtin dialect
//! for types it does.
//!
//! ## Configuration format
//!
//! ```toml
//! # Override or add dialects by extension (without the leading dot)
//! [dialects.vhd]
//! line_prefix = "--"
//! single_line = "--"
//!
//! [dialects.rs]
//! block_start = "/*"
//! block_end = "*/"
//! single_line = "//"
//!
//! # Override dialects for specific filenames or filename globs
//! [filenames."Makefile"]
//! line_prefix = "#"
//! single_line = "#"
//!
//! [filenames."*.cmake.in"]
//! line_prefix = "#"
//! single_line = "#"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// User-defined comment dialect for a file type.
///
/// Mirrors [`crate::dialect::CommentMarkers`]; either both block tokens are
/// present (delimiter-paired dialect) or neither is (prefix-only dialect).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DialectConfig {
  /// Token opening a delimiter-paired comment block.
  #[serde(default)]
  pub block_start: Option<String>,

  /// Token closing a delimiter-paired comment block.
  #[serde(default)]
  pub block_end: Option<String>,

  /// Prefix for block content lines.
  #[serde(default)]
  pub line_prefix: String,

  /// Single-line comment marker.
  pub single_line: String,
}

impl DialectConfig {
  /// Create a prefix-only dialect config.
  ///
  /// # Arguments
  ///
  /// * `prefix` - The line marker (e.g. "#" or "-- ")
  pub fn prefix_only(prefix: &str) -> Self {
    Self {
      block_start: None,
      block_end: None,
      line_prefix: prefix.to_string(),
      single_line: prefix.to_string(),
    }
  }

  /// Create a delimiter-paired dialect config.
  ///
  /// # Arguments
  ///
  /// * `block_start` - Block opening token
  /// * `block_end` - Block closing token
  /// * `single_line` - Single-line comment marker
  pub fn paired(block_start: &str, block_end: &str, single_line: &str) -> Self {
    Self {
      block_start: Some(block_start.to_string()),
      block_end: Some(block_end.to_string()),
      line_prefix: String::new(),
      single_line: single_line.to_string(),
    }
  }
}

/// User configuration loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Dialect overrides keyed by file extension (without the leading dot).
  #[serde(default)]
  pub dialects: HashMap<String, DialectConfig>,

  /// Dialect overrides keyed by exact filename or filename glob (e.g.
  /// "Makefile", "*.cmake.in").
  #[serde(default)]
  pub filenames: HashMap<String, DialectConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A dialect configuration is invalid.
  #[error("Invalid dialect for '{key}': {message}")]
  InvalidDialect { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed, or contains an invalid dialect definition.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    debug!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    Ok(config)
  }

  /// Validate every dialect definition in the configuration.
  ///
  /// A dialect must have a non-empty `single_line` marker, and its block
  /// tokens must come as a pair (both present or both absent).
  fn validate(&self) -> Result<(), ConfigError> {
    let entries = self.dialects.iter().chain(self.filenames.iter());
    for (key, dialect) in entries {
      if dialect.single_line.is_empty() {
        return Err(ConfigError::InvalidDialect {
          key: key.clone(),
          message: "single_line marker must not be empty".to_string(),
        });
      }
      if dialect.block_start.is_some() != dialect.block_end.is_some() {
        return Err(ConfigError::InvalidDialect {
          key: key.clone(),
          message: "block_start and block_end must be defined together".to_string(),
        });
      }
    }
    Ok(())
  }
}
