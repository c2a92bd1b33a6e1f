//! # Copyright Generator Module
//!
//! This module decides whether a previously parsed copyright message needs
//! to change for a new pair of creation/modification years, and produces
//! the replacement line text when it does. It also covers the ownership
//! flows: appending a co-owner, handing a notice off to a new owner at a
//! transition year, and composing a brand-new notice when no prior message
//! exists.
//!
//! The year rules:
//!
//! - The start year never moves forward: an already recorded earlier start
//!   year wins over a later supplied creation year.
//! - A message becomes multi-year when the supplied modification year
//!   differs from the creation year, or when the existing message already
//!   carried more than one year.
//! - When nothing would change, the original line text is returned
//!   unchanged and `changed` is `false`.

use tracing::debug;

use crate::grammar::{CopyrightGrammar, ParsedCopyrightLine};

/// Generates updated copyright messages from a loaded parse result.
///
/// The generator borrows a grammar for message assembly and owns the
/// parse record it operates on; load one with
/// [`load`](Self::load) or construct from an existing record with
/// [`from_parsed`](Self::from_parsed).
///
/// # Examples
///
/// ```rust
/// use copyscan::generator::CopyrightGenerator;
/// use copyscan::grammar::CopyrightGrammar;
///
/// let grammar = CopyrightGrammar::english();
/// let mut generator = CopyrightGenerator::new(&grammar);
/// generator.load("Copyright (C) 2022-2023 Scott Summers");
///
/// let (changed, message) = generator.new_message(2022, Some(2024));
/// assert!(changed);
/// assert_eq!(message, "Copyright (C) 2022-2024 Scott Summers");
/// ```
pub struct CopyrightGenerator<'g> {
  /// Grammar used for parsing and message assembly.
  grammar: &'g CopyrightGrammar,
  /// The loaded parse result the generator operates on.
  parsed: ParsedCopyrightLine,
}

impl<'g> CopyrightGenerator<'g> {
  /// Create a generator with no parse loaded.
  ///
  /// Until a message is loaded, [`new_message`](Self::new_message) takes
  /// the default-synthesis path.
  pub fn new(grammar: &'g CopyrightGrammar) -> Self {
    Self {
      grammar,
      parsed: ParsedCopyrightLine::default(),
    }
  }

  /// Create a generator over an existing parse record.
  pub const fn from_parsed(grammar: &'g CopyrightGrammar, parsed: ParsedCopyrightLine) -> Self {
    Self { grammar, parsed }
  }

  /// Parse a copyright line and load the result.
  ///
  /// # Parameters
  ///
  /// * `line` - The copyright line text (callers typically trim the
  ///   trailing newline first so regenerated text stays single-line)
  pub fn load(&mut self, line: &str) {
    self.parsed = self.grammar.parse(line);
  }

  /// The currently loaded parse record.
  pub const fn parsed(&self) -> &ParsedCopyrightLine {
    &self.parsed
  }

  /// A message is multi-year when the modification year is supplied and
  /// differs from the creation year.
  const fn is_multi_year(create_year: i32, last_modify_year: Option<i32>) -> bool {
    match last_modify_year {
      Some(modify_year) => modify_year != create_year,
      None => false,
    }
  }

  /// The year-update decision for a valid loaded parse.
  ///
  /// Returns `None` when no valid parse is loaded.
  fn updated_message(&self, create_year: i32, last_modify_year: Option<i32>) -> Option<(bool, String)> {
    let years = self.parsed.years();
    let current_start = years.first().copied()?;
    let current_last = years.last().copied()?;

    // The recorded start year never advances forward in time.
    let start_year = current_start.min(create_year);

    if Self::is_multi_year(create_year, last_modify_year) || years.len() > 1 {
      let effective_end = match last_modify_year {
        Some(modify_year) => modify_year,
        None => current_last.max(create_year),
      };

      if current_start == start_year && current_last == effective_end {
        debug!("copyright years unchanged ({start_year}-{effective_end})");
        Some((false, self.parsed.text().to_string()))
      } else {
        let message = self.grammar.build_updated_line(&self.parsed, start_year, Some(effective_end), true)?;
        debug!("copyright years updated to {start_year}-{effective_end}");
        Some((true, message))
      }
    } else if years.len() == 1 && start_year == current_start {
      debug!("copyright year unchanged ({start_year})");
      Some((false, self.parsed.text().to_string()))
    } else {
      let message = self.grammar.build_updated_line(&self.parsed, start_year, last_modify_year, true)?;
      debug!("copyright year updated to {start_year}");
      Some((true, message))
    }
  }

  /// Default path when no valid parse is loaded: synthesize a brand-new
  /// message with the placeholder owner `"None"` and report a change
  /// unconditionally.
  fn default_message(&self, create_year: i32, last_modify_year: Option<i32>) -> (bool, String) {
    (true, self.grammar.compose_default("None", create_year, last_modify_year))
  }

  /// Decide whether the loaded message must change for the given years and
  /// return the (possibly regenerated) message text.
  ///
  /// # Parameters
  ///
  /// * `create_year` - File creation year
  /// * `last_modify_year` - File last-modification year, if known
  ///
  /// # Returns
  ///
  /// `(changed, message)`: when nothing changed, `message` is the original
  /// line text byte for byte; with no valid parse loaded, a brand-new
  /// default message and `changed = true`.
  pub fn new_message(&self, create_year: i32, last_modify_year: Option<i32>) -> (bool, String) {
    match self.updated_message(create_year, last_modify_year) {
      Some(result) => result,
      None => self.default_message(create_year, last_modify_year),
    }
  }

  /// Freeze the loaded message at `transition_year` and build a successor
  /// message for a new owner spanning `(transition_year, last_modify_year)`.
  ///
  /// Used for ownership handoffs where one party's notice ends and
  /// another's begins in the same year. The loaded record's owner is
  /// replaced as a side effect.
  ///
  /// # Returns
  ///
  /// `(changed, old_message, new_message)`, or `None` when no valid parse
  /// is loaded.
  pub fn transition(
    &mut self,
    create_year: i32,
    transition_year: i32,
    last_modify_year: i32,
    new_owner: &str,
  ) -> Option<(bool, String, String)> {
    let (changed, old_message) = self.updated_message(create_year, Some(transition_year))?;

    self.parsed.replace_owner(new_owner);
    let new_message = self
      .grammar
      .build_updated_line(&self.parsed, transition_year, Some(last_modify_year), true)?;

    Some((changed, old_message, new_message))
  }

  /// Append a co-owner to the loaded message and rebuild it for the given
  /// years.
  ///
  /// # Returns
  ///
  /// The rebuilt message, or `None` when no valid parse is loaded (the
  /// record is left untouched in that case).
  pub fn add_owner(&mut self, create_year: i32, last_modify_year: Option<i32>, new_owner: &str) -> Option<String> {
    if !self.parsed.add_owner(new_owner) {
      return None;
    }
    self.grammar.build_updated_line(&self.parsed, create_year, last_modify_year, true)
  }

  /// Compose a brand-new copyright message from scratch using the
  /// grammar's default message word and tag.
  ///
  /// # Parameters
  ///
  /// * `owner` - Owner for the new message
  /// * `create_year` - File creation year
  /// * `last_modify_year` - File last-modification year, if known
  pub fn new_copyright(&self, owner: &str, create_year: i32, last_modify_year: Option<i32>) -> String {
    self.grammar.compose_default(owner, create_year, last_modify_year)
  }
}
