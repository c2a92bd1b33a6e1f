//! # Copyright Grammar Module
//!
//! This module parses copyright lines into their structural fields and
//! regenerates them with new years or ownership. A copyright line has four
//! required fields — the message word ("Copyright"), the legal tag
//! ("(c)"), one or more years, and the owner — plus optional decoration
//! before and after them (comment markers, box-drawing, padding).
//!
//! A grammar is configured with the regular expressions matching each
//! field and with the field order it expects:
//!
//! - [`FieldOrder::MessageFirst`]: `[decoration] MESSAGE TAG YEARS OWNER
//!   [decoration]`
//! - [`FieldOrder::OwnerFirst`]: `[decoration] OWNER MESSAGE TAG YEARS
//!   [decoration]`
//!
//! The order check is the critical disambiguator: a line containing all
//! four fields in the wrong relative order is not a copyright line.
//!
//! ## Example
//!
//! ```rust
//! use copyscan::grammar::CopyrightGrammar;
//!
//! let grammar = CopyrightGrammar::english();
//! assert!(grammar.is_copyright_line("Copyright (c) 2022 James Kirk"));
//!
//! let parsed = grammar.parse(" * Copyright (c) 2022-2023 James Kirk *");
//! assert!(parsed.is_valid());
//! assert_eq!(parsed.owner(), Some("James Kirk"));
//! assert_eq!(parsed.years(), &[2022, 2023]);
//!
//! let updated = grammar.build_updated_line(&parsed, 2022, Some(2025), true);
//! assert_eq!(updated.as_deref(), Some(" * Copyright (c) 2022-2025 James Kirk *"));
//! ```

mod marker;
mod parsed;
mod years;

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

pub use self::marker::SubTextMarker;
pub use self::parsed::ParsedCopyrightLine;
pub use self::years::{EPOCH_YEAR, YearSet};

/// First alphanumeric character; locates where an owner-first line's owner
/// text can begin within the leading decoration.
static OWNER_LEAD: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-zA-Z0-9]").expect("owner lead regex must compile"));

/// Which relative field order a grammar expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
  /// `MESSAGE TAG YEARS OWNER` — the common English convention.
  MessageFirst,
  /// `OWNER MESSAGE TAG YEARS`.
  OwnerFirst,
}

/// Error type for grammar construction.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
  /// A field pattern failed to compile.
  #[error("Invalid {field} pattern '{pattern}': {source}")]
  InvalidPattern {
    field: &'static str,
    pattern: String,
    source: regex::Error,
  },
}

/// Pattern configuration for a [`CopyrightGrammar`].
///
/// The defaults are the English-language patterns ("Copyright"/"(c)",
/// 4-digit years, ASCII matching).
#[derive(Debug, Clone)]
pub struct GrammarSpec {
  /// Pattern matching the message word (e.g. `Copyright|COPYRIGHT`).
  pub message_pattern: String,
  /// Pattern matching the legal tag (e.g. `\([cC]\)`).
  pub tag_pattern: String,
  /// Pattern matching one year token.
  pub year_pattern: String,
  /// Character-class pattern for the characters an owner string may
  /// contain; applied one character at a time.
  pub owner_chars: String,
  /// Message word used when composing a brand-new line.
  pub default_message: String,
  /// Legal tag used when composing a brand-new line.
  pub default_tag: String,
  /// `true` for unicode matching, `false` for ASCII-only.
  pub unicode: bool,
}

impl Default for GrammarSpec {
  fn default() -> Self {
    Self {
      message_pattern: r"Copyright|COPYRIGHT|copyright".to_string(),
      tag_pattern: r"\([cC]\)".to_string(),
      year_pattern: r"(\d{4})".to_string(),
      owner_chars: r"[a-zA-Z0-9,\./\- @]".to_string(),
      default_message: "Copyright".to_string(),
      default_tag: "(c)".to_string(),
      unicode: false,
    }
  }
}

/// Field components located in one candidate line.
struct LineComponents<'t> {
  message: Option<regex::Match<'t>>,
  tag: Option<regex::Match<'t>>,
  years: YearSet,
}

/// Parser and generator for copyright lines in one field order.
///
/// The grammar holds only compiled patterns and composition defaults; it
/// is never mutated by parsing, so one instance can be reused across any
/// number of files. Each [`parse`](Self::parse) call returns a fresh
/// [`ParsedCopyrightLine`] record.
pub struct CopyrightGrammar {
  /// Expected field order.
  order: FieldOrder,
  /// Compiled message-word pattern.
  message_regex: Regex,
  /// Compiled legal-tag pattern.
  tag_regex: Regex,
  /// Compiled year-token pattern.
  year_regex: Regex,
  /// Compiled owner character-class pattern.
  owner_char_regex: Regex,
  /// Message word for brand-new lines.
  default_message: String,
  /// Legal tag for brand-new lines.
  default_tag: String,
}

impl CopyrightGrammar {
  /// Create a grammar from the given field order and patterns.
  ///
  /// # Arguments
  ///
  /// * `order` - The relative field order the grammar accepts
  /// * `spec` - Field patterns, composition defaults and matching mode
  ///
  /// # Errors
  ///
  /// Returns [`GrammarError::InvalidPattern`] when any pattern fails to
  /// compile.
  pub fn new(order: FieldOrder, spec: &GrammarSpec) -> Result<Self, GrammarError> {
    Ok(Self {
      order,
      message_regex: compile("message", &spec.message_pattern, spec.unicode)?,
      tag_regex: compile("tag", &spec.tag_pattern, spec.unicode)?,
      year_regex: compile("year", &spec.year_pattern, spec.unicode)?,
      owner_char_regex: compile("owner", &spec.owner_chars, spec.unicode)?,
      default_message: spec.default_message.clone(),
      default_tag: spec.default_tag.clone(),
    })
  }

  /// The English-language grammar: message-first order with
  /// "Copyright"/"(c)" defaults and ASCII matching.
  pub fn english() -> Self {
    Self::new(FieldOrder::MessageFirst, &GrammarSpec::default()).expect("builtin English grammar patterns must compile")
  }

  /// The field order this grammar accepts.
  pub const fn order(&self) -> FieldOrder {
    self.order
  }

  /// Locate the order-independent components of a candidate line.
  fn parse_components<'t>(&self, line: &'t str) -> LineComponents<'t> {
    LineComponents {
      message: self.message_regex.find(line),
      tag: self.tag_regex.find(line),
      years: YearSet::parse(line, &self.year_regex, 0),
    }
  }

  /// Greedily consume owner characters from the front of `candidate`, then
  /// trim whitespace from the consumed run.
  fn extract_owner(&self, candidate: &str, base_offset: usize) -> Option<SubTextMarker> {
    let mut consumed = candidate.len();
    let mut buf = [0u8; 4];
    for (index, ch) in candidate.char_indices() {
      if !self.owner_char_regex.is_match(ch.encode_utf8(&mut buf)) {
        consumed = index;
        break;
      }
    }

    let owner = SubTextMarker::new(&candidate[..consumed], base_offset);
    (!owner.is_empty()).then_some(owner)
  }

  /// Extract the owner field for this grammar's order, when its candidate
  /// region can be determined.
  fn owner_field(&self, line: &str, components: &LineComponents<'_>) -> Option<SubTextMarker> {
    match self.order {
      FieldOrder::MessageFirst => {
        // Owner candidate is everything after the last year.
        let end_of_years = components.years.end_index()?;
        self.extract_owner(&line[end_of_years..], end_of_years)
      }
      FieldOrder::OwnerFirst => {
        // Owner candidate runs from the first alphanumeric character up to
        // the message word.
        let message = components.message.as_ref()?;
        let owner_start = OWNER_LEAD.find(&line[..message.start()]).map_or(0, |m| m.start());
        self.extract_owner(&line[owner_start..message.start()], owner_start)
      }
    }
  }

  /// Wrap any non-whitespace remainder as trailing decoration.
  fn extract_trailing(candidate: &str, base_offset: usize) -> Option<SubTextMarker> {
    let trailing = SubTextMarker::new(candidate, base_offset);
    (!trailing.is_empty()).then_some(trailing)
  }

  /// Check whether a line is a copyright message with all four required
  /// fields present in this grammar's order.
  ///
  /// # Parameters
  ///
  /// * `line` - The candidate line
  ///
  /// # Returns
  ///
  /// `true` iff message, tag, year(s) and owner all matched and their
  /// offsets satisfy the required relative order. A line with every field
  /// present but out of order is rejected the same as one with a field
  /// missing.
  pub fn is_copyright_line(&self, line: &str) -> bool {
    let components = self.parse_components(line);
    let Some(owner) = self.owner_field(line, &components) else {
      return false;
    };
    let (Some(message), Some(tag)) = (components.message, components.tag) else {
      return false;
    };
    let (Some(year_start), Some(year_end)) = (components.years.start_index(), components.years.end_index()) else {
      return false;
    };

    match self.order {
      FieldOrder::MessageFirst => message.end() < tag.start() && tag.end() < year_start && year_end < owner.start(),
      FieldOrder::OwnerFirst => owner.start() < message.start() && message.end() < tag.start() && tag.end() < year_start,
    }
  }

  /// Parse a line into a [`ParsedCopyrightLine`] record.
  ///
  /// Every field that individually matched is stored even when the overall
  /// record ends up invalid; only the raw-text field is cleared in that
  /// case, so diagnostics can still inspect the partial result.
  ///
  /// # Parameters
  ///
  /// * `line` - The line to parse
  pub fn parse(&self, line: &str) -> ParsedCopyrightLine {
    let components = self.parse_components(line);
    let owner = self.owner_field(line, &components);

    let mut record = ParsedCopyrightLine {
      valid: true,
      ..Default::default()
    };

    match self.order {
      FieldOrder::MessageFirst => {
        if let Some(message) = &components.message {
          record.leading = line[..message.start()].to_string();
        }
        if let Some(owner_marker) = &owner {
          record.trailing = Self::extract_trailing(&line[owner_marker.end()..], owner_marker.end());
        }
      }
      FieldOrder::OwnerFirst => {
        if let Some(message) = &components.message {
          let owner_start = OWNER_LEAD.find(&line[..message.start()]).map_or(0, |m| m.start());
          record.leading = line[..owner_start].to_string();
        }
        if let Some(end_of_years) = components.years.end_index() {
          record.trailing = Self::extract_trailing(&line[end_of_years..], end_of_years);
        }
      }
    }

    match components.message {
      Some(message) => record.message = Some(message.as_str().to_string()),
      None => record.valid = false,
    }
    match components.tag {
      Some(tag) => record.tag = Some(tag.as_str().to_string()),
      None => record.valid = false,
    }
    if components.years.is_valid() {
      record.years = components.years.years().to_vec();
    } else {
      record.valid = false;
    }
    match owner {
      Some(owner_marker) => record.owner = Some(owner_marker.text().to_string()),
      None => record.valid = false,
    }

    if record.valid {
      record.text = line.to_string();
    }
    record
  }

  /// Join the given fields into a copyright message in this grammar's
  /// order, without any decoration.
  ///
  /// The year portion renders as `YYYY` when `last_modify_year` is absent
  /// or equal to `create_year`, else as `YYYY-YYYY`.
  ///
  /// # Arguments
  ///
  /// * `owner` - Owner text
  /// * `message_word` - Message word text
  /// * `tag_word` - Legal tag text
  /// * `create_year` - First year of the message
  /// * `last_modify_year` - Last year of the message, if different
  pub fn build_message(
    &self,
    owner: &str,
    message_word: &str,
    tag_word: &str,
    create_year: i32,
    last_modify_year: Option<i32>,
  ) -> String {
    let years = year_string(create_year, last_modify_year);
    match self.order {
      FieldOrder::MessageFirst => format!("{message_word} {tag_word} {years} {owner}"),
      FieldOrder::OwnerFirst => format!("{owner} {message_word} {tag_word} {years}"),
    }
  }

  /// Compose a brand-new copyright message from this grammar's default
  /// message word and tag.
  ///
  /// # Arguments
  ///
  /// * `owner` - Owner text for the new message
  /// * `create_year` - First year of the message
  /// * `last_modify_year` - Last year of the message, if different
  pub fn compose_default(&self, owner: &str, create_year: i32, last_modify_year: Option<i32>) -> String {
    self.build_message(owner, &self.default_message, &self.default_tag, create_year, last_modify_year)
  }

  /// Regenerate a previously parsed line with new years, optionally
  /// restoring its decoration.
  ///
  /// With `include_decoration`, the parsed leading text is prefixed and
  /// the trailing decoration is re-appended with space padding recomputed
  /// so it lands at the column it occupied in the original line. When the
  /// regenerated text is longer than the original padding allowed, the
  /// trailing decoration directly abuts the text (padding never goes
  /// negative).
  ///
  /// # Returns
  ///
  /// The regenerated line, or `None` when no valid parse is loaded.
  pub fn build_updated_line(
    &self,
    parsed: &ParsedCopyrightLine,
    create_year: i32,
    last_modify_year: Option<i32>,
    include_decoration: bool,
  ) -> Option<String> {
    if !parsed.is_valid() {
      return None;
    }
    let message = parsed.message()?;
    let tag = parsed.tag()?;
    let owner = parsed.owner()?;

    let mut new_line = if include_decoration {
      parsed.leading().to_string()
    } else {
      String::new()
    };
    new_line.push_str(&self.build_message(owner, message, tag, create_year, last_modify_year));

    if include_decoration && let Some(trailing) = &parsed.trailing {
      let padding = trailing.start().saturating_sub(new_line.len());
      new_line.push_str(&" ".repeat(padding));
      new_line.push_str(trailing.text());
    }

    Some(new_line)
  }
}

/// Render the year portion of a message.
fn year_string(create_year: i32, last_modify_year: Option<i32>) -> String {
  match last_modify_year {
    Some(modify_year) if modify_year != create_year => format!("{create_year}-{modify_year}"),
    _ => create_year.to_string(),
  }
}

/// Compile one field pattern in the requested matching mode.
fn compile(field: &'static str, pattern: &str, unicode: bool) -> Result<Regex, GrammarError> {
  RegexBuilder::new(pattern)
    .unicode(unicode)
    .build()
    .map_err(|source| GrammarError::InvalidPattern {
      field,
      pattern: pattern.to_string(),
      source,
    })
}
