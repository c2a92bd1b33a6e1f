//! # Copyright Finder Module
//!
//! This module scans a stream for lines matching a copyright grammar,
//! optionally bounded to an offset window (typically one comment block),
//! and reports each match's starting offset and text.

use std::io::{BufRead, Seek};

use anyhow::Result;
use tracing::trace;

use crate::grammar::CopyrightGrammar;
use crate::scanner::LineScanner;

/// Location of one copyright line within a stream.
///
/// The text retains its trailing newline, so `offset + text.len()` is the
/// offset at which the scan for a following match resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightLineLocation {
  /// Byte offset at which the line begins.
  pub offset: u64,
  /// The full line text, trailing newline included.
  pub text: String,
}

impl CopyrightLineLocation {
  /// Byte offset immediately after this line.
  pub fn end_offset(&self) -> u64 {
    self.offset + self.text.len() as u64
  }
}

/// Scans a stream for copyright lines matching a grammar.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// use copyscan::finder::CopyrightFinder;
/// use copyscan::grammar::CopyrightGrammar;
/// use copyscan::scanner::LineScanner;
///
/// # fn main() -> anyhow::Result<()> {
/// let source = "/*\n * Copyright (c) 2024 ACME Corp\n */\n";
/// let mut scanner = LineScanner::new(Cursor::new(source))?;
///
/// let grammar = CopyrightGrammar::english();
/// let finder = CopyrightFinder::new(&grammar);
///
/// let hit = finder.find_first(&mut scanner)?.unwrap();
/// assert_eq!(hit.offset, 3);
/// # Ok(())
/// # }
/// ```
pub struct CopyrightFinder<'g> {
  /// The grammar deciding what counts as a copyright line.
  grammar: &'g CopyrightGrammar,
}

impl<'g> CopyrightFinder<'g> {
  /// Create a finder using the given grammar.
  pub const fn new(grammar: &'g CopyrightGrammar) -> Self {
    Self { grammar }
  }

  /// Scan from `start_offset` for the next copyright line.
  ///
  /// # Parameters
  ///
  /// * `scanner` - The stream to scan
  /// * `start_offset` - Absolute offset to begin the scan at
  /// * `end_offset` - Exclusive scan bound: a line starting at or past this
  ///   offset stops the search; `None` scans to end of stream
  ///
  /// # Returns
  ///
  /// The first matching line's location, or `None` when the window is
  /// exhausted without a match.
  ///
  /// # Errors
  ///
  /// I/O faults from the stream are propagated.
  pub fn find_next<R: BufRead + Seek>(
    &self,
    scanner: &mut LineScanner<R>,
    start_offset: u64,
    end_offset: Option<u64>,
  ) -> Result<Option<CopyrightLineLocation>> {
    scanner.seek_to(start_offset)?;

    while let Some(line) = scanner.next_line()? {
      if let Some(end) = end_offset
        && line.offset >= end
      {
        break;
      }

      if self.grammar.is_copyright_line(&line.text) {
        trace!("copyright line at offset {}", line.offset);
        return Ok(Some(CopyrightLineLocation {
          offset: line.offset,
          text: line.text,
        }));
      }
    }

    Ok(None)
  }

  /// Scan the whole stream for its first copyright line.
  ///
  /// # Errors
  ///
  /// I/O faults from the stream are propagated.
  pub fn find_first<R: BufRead + Seek>(&self, scanner: &mut LineScanner<R>) -> Result<Option<CopyrightLineLocation>> {
    self.find_next(scanner, 0, None)
  }

  /// Scan the whole stream and collect every copyright line.
  ///
  /// # Returns
  ///
  /// All matching lines in stream order; empty when the stream has none.
  ///
  /// # Errors
  ///
  /// I/O faults from the stream are propagated.
  pub fn find_all<R: BufRead + Seek>(&self, scanner: &mut LineScanner<R>) -> Result<Vec<CopyrightLineLocation>> {
    let mut locations = Vec::new();
    let mut start_offset = 0;

    while let Some(location) = self.find_next(scanner, start_offset, None)? {
      start_offset = location.end_offset();
      locations.push(location);
    }

    Ok(locations)
  }
}
