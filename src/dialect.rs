//! # Comment Dialect Module
//!
//! This module defines the comment-delimiter tokens used by the comment
//! dialects the scanner understands, and the lookup from a file name to the
//! dialect appropriate for it.
//!
//! A dialect is a small record of four tokens:
//! - `block_start` / `block_end` for delimiter-paired dialects (`/* ... */`,
//!   `""" ... """`)
//! - `line_prefix` for dialects whose blocks are runs of prefixed lines
//!   (`#`, `REM `)
//! - `single_line` for the single-line comment marker (`//`, `#`)
//!
//! Unknown file types resolve to no dialect at all; callers then fall back
//! to blank-line-delimited plain-text scanning (see [`crate::block`]).

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, DialectConfig};

/// Comment-delimiter tokens for one comment dialect.
///
/// # Fields
///
/// * `block_start` - Token opening a delimiter-paired block, or `None` for
///   prefix-only dialects
/// * `block_end` - Token closing a delimiter-paired block, or `None` for
///   prefix-only dialects
/// * `line_prefix` - Prefix written before block content lines when a block
///   is regenerated (empty for C-family dialects)
/// * `single_line` - The single-line comment marker; runs of lines starting
///   with this marker are treated as an implicit block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarkers {
  /// Token opening a delimiter-paired comment block.
  pub block_start: Option<String>,
  /// Token closing a delimiter-paired comment block.
  pub block_end: Option<String>,
  /// Prefix for block content lines.
  pub line_prefix: String,
  /// Single-line comment marker.
  pub single_line: String,
}

impl CommentMarkers {
  /// Create a delimiter-paired dialect.
  ///
  /// # Arguments
  ///
  /// * `block_start` - Block opening token (e.g. "/*")
  /// * `block_end` - Block closing token (e.g. "*/")
  /// * `line_prefix` - Prefix for block content lines (e.g. "" or " *")
  /// * `single_line` - Single-line comment marker (e.g. "//")
  pub fn paired(block_start: &str, block_end: &str, line_prefix: &str, single_line: &str) -> Self {
    Self {
      block_start: Some(block_start.to_string()),
      block_end: Some(block_end.to_string()),
      line_prefix: line_prefix.to_string(),
      single_line: single_line.to_string(),
    }
  }

  /// Create a prefix-only dialect (no paired block tokens).
  ///
  /// # Arguments
  ///
  /// * `prefix` - The line marker used both as the block line prefix and the
  ///   single-line comment marker (e.g. "#" or "REM ")
  pub fn prefix_only(prefix: &str) -> Self {
    Self {
      block_start: None,
      block_end: None,
      line_prefix: prefix.to_string(),
      single_line: prefix.to_string(),
    }
  }

  /// Returns `true` if this dialect has paired block open/close tokens.
  pub const fn has_block_tokens(&self) -> bool {
    self.block_start.is_some() && self.block_end.is_some()
  }
}

impl From<&DialectConfig> for CommentMarkers {
  fn from(config: &DialectConfig) -> Self {
    Self {
      block_start: config.block_start.clone(),
      block_end: config.block_end.clone(),
      line_prefix: config.line_prefix.clone(),
      single_line: config.single_line.clone(),
    }
  }
}

/// Determines the builtin comment dialect for a file based on its extension.
///
/// The lookup is case-sensitive and matches on the full extension including
/// the leading dot, so `file.C` or `file.` resolve to no dialect.
///
/// # Parameters
///
/// * `path` - Path to the file
///
/// # Returns
///
/// The `CommentMarkers` for the file type, or `None` when the extension is
/// unknown (callers fall back to plain-text block scanning).
pub fn markers_for_file(path: &Path) -> Option<CommentMarkers> {
  let file_name = path.file_name().and_then(|name| name.to_str())?;
  let extension = &file_name[file_name.rfind('.')?..];

  match extension {
    ".c" | ".cpp" | ".h" | ".hpp" | ".js" | ".ts" => Some(CommentMarkers::paired("/*", "*/", "", "//")),
    ".py" => Some(CommentMarkers::paired("\"\"\"", "\"\"\"", "", "#")),
    ".sh" => Some(CommentMarkers::prefix_only("#")),
    ".bat" => Some(CommentMarkers::prefix_only("REM ")),
    _ => None,
  }
}

/// Trait for resolving comment dialects for file paths.
///
/// This trait allows different strategies for determining the appropriate
/// comment dialect for a given file path. Implementations can use the
/// builtin table, user configuration, or both.
pub trait DialectResolver: Send + Sync {
  /// Resolve the comment dialect for the given file path.
  ///
  /// # Arguments
  ///
  /// * `path` - The path to the file
  ///
  /// # Returns
  ///
  /// The dialect markers for the file, or `None` when the file type has no
  /// known dialect and plain-text scanning should be used.
  fn resolve(&self, path: &Path) -> Option<CommentMarkers>;
}

/// Default resolver using the builtin extension table.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl DialectResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<CommentMarkers> {
    markers_for_file(path)
  }
}

/// Configurable resolver that checks user config first, then falls back to
/// the builtin table.
///
/// Resolution order:
/// 1. Exact filename keys in the config
/// 2. Filename glob patterns in the config
/// 3. Extension overrides in the config
/// 4. The builtin extension table
pub struct ConfigurableResolver {
  config: Arc<Config>,
}

impl std::fmt::Debug for ConfigurableResolver {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConfigurableResolver").field("config", &"<config>").finish()
  }
}

impl ConfigurableResolver {
  /// Create a new configurable resolver with the given config.
  ///
  /// # Arguments
  ///
  /// * `config` - The loaded configuration
  pub fn new(config: Config) -> Self {
    Self {
      config: Arc::new(config),
    }
  }

  /// Create a new configurable resolver from an Arc'd config.
  ///
  /// This is useful when you want to share the config across multiple
  /// resolvers.
  pub const fn from_arc(config: Arc<Config>) -> Self {
    Self { config }
  }
}

impl DialectResolver for ConfigurableResolver {
  fn resolve(&self, path: &Path) -> Option<CommentMarkers> {
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("").to_lowercase();

    // 1. Check filename patterns in config (exact match first)
    if let Some(dialect) = self.config.filenames.get(&file_name) {
      debug!("Using config filename override for: {}", file_name);
      return Some(CommentMarkers::from(dialect));
    }

    // 2. Check filename patterns with glob matching
    for (pattern, dialect) in &self.config.filenames {
      if pattern.contains('*')
        && let Ok(glob_pattern) = glob::Pattern::new(&pattern.to_lowercase())
        && glob_pattern.matches(&file_name)
      {
        debug!("Using config filename glob override '{}' for: {}", pattern, file_name);
        return Some(CommentMarkers::from(dialect));
      }
    }

    // 3. Check extension overrides in config
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("").to_lowercase();

    if let Some(dialect) = self.config.dialects.get(&extension) {
      debug!("Using config extension override for: .{}", extension);
      return Some(CommentMarkers::from(dialect));
    }

    // 4. Fall back to the builtin table
    markers_for_file(path)
  }
}

/// Create a comment dialect resolver based on the provided configuration.
///
/// If a configuration is provided, returns a [`ConfigurableResolver`] that
/// checks user overrides first. Otherwise, returns a [`BuiltinResolver`].
pub fn create_resolver(config: Option<Config>) -> Box<dyn DialectResolver> {
  match config {
    Some(cfg) => Box::new(ConfigurableResolver::new(cfg)),
    None => Box::new(BuiltinResolver),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;
  use std::path::Path;

  use super::*;

  #[test]
  fn test_builtin_c_family() {
    for name in ["testfile.c", "testfile.cpp", "testfile.h", "testfile.hpp", "a.js", "a.ts"] {
      let markers = markers_for_file(Path::new(name)).unwrap();
      assert_eq!(markers.block_start.as_deref(), Some("/*"));
      assert_eq!(markers.block_end.as_deref(), Some("*/"));
      assert_eq!(markers.single_line, "//");
    }
  }

  #[test]
  fn test_builtin_python_docstring() {
    let markers = markers_for_file(Path::new("testfile.py")).unwrap();
    assert_eq!(markers.block_start.as_deref(), Some("\"\"\""));
    assert_eq!(markers.block_end.as_deref(), Some("\"\"\""));
    assert_eq!(markers.single_line, "#");
  }

  #[test]
  fn test_builtin_prefix_only() {
    let markers = markers_for_file(Path::new("testfile.sh")).unwrap();
    assert!(markers.block_start.is_none());
    assert!(markers.block_end.is_none());
    assert_eq!(markers.single_line, "#");

    let markers = markers_for_file(Path::new("testfile.bat")).unwrap();
    assert!(!markers.has_block_tokens());
    assert_eq!(markers.line_prefix, "REM ");
  }

  #[test]
  fn test_unknown_extension_has_no_dialect() {
    assert!(markers_for_file(Path::new("testfile.txt")).is_none());
    assert!(markers_for_file(Path::new("testfile")).is_none());
    assert!(markers_for_file(Path::new("testfile.")).is_none());
    // Case-sensitive lookup
    assert!(markers_for_file(Path::new("testfile.C")).is_none());
  }

  #[test]
  fn test_builtin_resolver_matches_table() {
    let resolver = BuiltinResolver;
    assert_eq!(resolver.resolve(Path::new("main.c")), markers_for_file(Path::new("main.c")));
    assert!(resolver.resolve(Path::new("notes.txt")).is_none());
  }

  #[test]
  fn test_configurable_resolver_extension_override() {
    let mut dialects = HashMap::new();
    dialects.insert("c".to_string(), DialectConfig::prefix_only("#"));

    let config = Config {
      dialects,
      filenames: HashMap::new(),
    };

    let resolver = ConfigurableResolver::new(config);
    let markers = resolver.resolve(Path::new("main.c")).unwrap();

    // Should use the config override instead of the builtin paired dialect
    assert!(markers.block_start.is_none());
    assert_eq!(markers.single_line, "#");
  }

  #[test]
  fn test_configurable_resolver_filename_override() {
    let mut filenames = HashMap::new();
    filenames.insert("makefile".to_string(), DialectConfig::prefix_only("#"));

    let config = Config {
      dialects: HashMap::new(),
      filenames,
    };

    let resolver = ConfigurableResolver::new(config);
    let markers = resolver.resolve(Path::new("Makefile")).unwrap();
    assert_eq!(markers.single_line, "#");
  }

  #[test]
  fn test_configurable_resolver_filename_glob() {
    let mut filenames = HashMap::new();
    filenames.insert("*.cmake.in".to_string(), DialectConfig::prefix_only("#"));

    let config = Config {
      dialects: HashMap::new(),
      filenames,
    };

    let resolver = ConfigurableResolver::new(config);
    let markers = resolver.resolve(Path::new("config.cmake.in")).unwrap();
    assert_eq!(markers.single_line, "#");
  }

  #[test]
  fn test_configurable_resolver_falls_back_to_builtin() {
    let config = Config::default();
    let resolver = ConfigurableResolver::new(config);

    let markers = resolver.resolve(Path::new("main.cpp")).unwrap();
    assert_eq!(markers.block_start.as_deref(), Some("/*"));

    assert!(resolver.resolve(Path::new("notes.txt")).is_none());
  }

  #[test]
  fn test_create_resolver() {
    let mut dialects = HashMap::new();
    dialects.insert("xyz".to_string(), DialectConfig::prefix_only(";; "));

    let resolver = create_resolver(Some(Config {
      dialects,
      filenames: HashMap::new(),
    }));
    let markers = resolver.resolve(Path::new("custom.xyz")).unwrap();
    assert_eq!(markers.single_line, ";; ");

    let resolver = create_resolver(None);
    assert!(resolver.resolve(Path::new("custom.xyz")).is_none());
  }
}
