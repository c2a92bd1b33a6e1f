//! # Block Orchestrator Module
//!
//! This module composes the comment-block locator and the copyright-line
//! finder: for each comment block in a stream it collects the copyright
//! lines the block contains, producing one record per block.
//!
//! A block with no copyright line still yields a record (with an empty
//! line list), and scanning continues past it; a block may also carry
//! several copyright lines, e.g. a company notice followed by a
//! third-party notice.

use std::io::{BufRead, Seek};

use anyhow::Result;
use tracing::debug;

use crate::block::{BlockLocation, CommentBlockLocator};
use crate::dialect::CommentMarkers;
use crate::finder::{CopyrightFinder, CopyrightLineLocation};
use crate::grammar::CopyrightGrammar;
use crate::scanner::LineScanner;

/// One comment block and the copyright lines found inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightBlockRecord {
  /// The block's location in the stream.
  pub block: BlockLocation,
  /// Copyright lines within the block, in stream order; may be empty.
  pub lines: Vec<CopyrightLineLocation>,
}

impl CopyrightBlockRecord {
  /// `true` when the block contains at least one copyright line.
  pub fn has_copyright(&self) -> bool {
    !self.lines.is_empty()
  }
}

/// Scans a whole stream for comment blocks and the copyright lines they
/// contain.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use std::path::Path;
///
/// use copyscan::dialect::markers_for_file;
/// use copyscan::grammar::CopyrightGrammar;
/// use copyscan::orchestrator::CopyrightBlockScanner;
/// use copyscan::scanner::LineScanner;
///
/// # fn main() -> anyhow::Result<()> {
/// let source = "/*\n * Copyright (c) 2024 ACME Corp\n */\nint main() {}\n";
/// let mut scanner = LineScanner::new(Cursor::new(source))?;
///
/// let grammar = CopyrightGrammar::english();
/// let block_scanner = CopyrightBlockScanner::new(markers_for_file(Path::new("main.c")), &grammar);
///
/// let records = block_scanner.scan(&mut scanner)?;
/// assert_eq!(records.len(), 1);
/// assert!(records[0].has_copyright());
/// # Ok(())
/// # }
/// ```
pub struct CopyrightBlockScanner<'g> {
  /// Locates comment blocks for the file's dialect.
  locator: CommentBlockLocator,
  /// Locates copyright lines within each block.
  finder: CopyrightFinder<'g>,
}

impl<'g> CopyrightBlockScanner<'g> {
  /// Create a scanner for the given dialect and grammar.
  ///
  /// # Arguments
  ///
  /// * `markers` - Comment dialect of the stream, or `None` for plain-text
  ///   block scanning
  /// * `grammar` - Grammar deciding what counts as a copyright line
  pub const fn new(markers: Option<CommentMarkers>, grammar: &'g CopyrightGrammar) -> Self {
    Self {
      locator: CommentBlockLocator::new(markers),
      finder: CopyrightFinder::new(grammar),
    }
  }

  /// Scan the whole stream, returning one record per comment block.
  ///
  /// The stream is rewound once at the start; between blocks it is
  /// repositioned to the previous block's end so the inner line search
  /// cannot disturb the outer block search.
  ///
  /// # Errors
  ///
  /// I/O faults from the stream are propagated.
  pub fn scan<R: BufRead + Seek>(&self, scanner: &mut LineScanner<R>) -> Result<Vec<CopyrightBlockRecord>> {
    scanner.rewind()?;
    let mut records = Vec::new();

    while let Some(block) = self.locator.find_next_block(scanner)? {
      let lines = self.copyright_lines_in(scanner, &block)?;
      debug!(
        "comment block at {}..{} with {} copyright line(s)",
        block.start,
        block.end,
        lines.len()
      );

      scanner.seek_to(block.end)?;
      records.push(CopyrightBlockRecord { block, lines });
    }

    Ok(records)
  }

  /// Collect every copyright line within one block's offset range.
  fn copyright_lines_in<R: BufRead + Seek>(
    &self,
    scanner: &mut LineScanner<R>,
    block: &BlockLocation,
  ) -> Result<Vec<CopyrightLineLocation>> {
    let mut lines = Vec::new();
    let mut search_start = block.start;

    while search_start < block.end {
      match self.finder.find_next(scanner, search_start, Some(block.end))? {
        Some(location) => {
          search_start = location.end_offset();
          lines.push(location);
        }
        None => break,
      }
    }

    Ok(lines)
  }
}
