//! # Comment Block Module
//!
//! This module locates the boundaries of comment blocks in a stream. Two
//! scanning modes exist:
//!
//! - **Dialect mode**: blocks are bounded by the dialect's paired
//!   open/close tokens (`/* ... */`), or by maximal runs of lines starting
//!   with the dialect's single-line marker (`//`, `#`, `REM `).
//! - **Plain-text mode** (no dialect): a block is any maximal run of
//!   consecutive non-blank lines.
//!
//! The locator holds no scan state of its own; the stream cursor is the
//! only resume point, so a caller scanning a whole file rewinds once and
//! calls [`CommentBlockLocator::find_next_block`] until it reports
//! not-found.

use std::io::{BufRead, Seek};

use anyhow::Result;
use tracing::trace;

use crate::dialect::CommentMarkers;
use crate::scanner::{LineScanner, ScannedLine};

/// Location of one comment block within a stream.
///
/// # Fields
///
/// * `start` - Byte offset of the block's first line
/// * `end` - Exclusive byte offset just past the block's last line; this is
///   also the resume point for the next block search
/// * `last_line_start` - Byte offset of the block's final content line,
///   marking where replaceable content ends before the closing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLocation {
  /// Byte offset of the block's first line.
  pub start: u64,
  /// Exclusive byte offset just past the block's last line.
  pub end: u64,
  /// Byte offset of the start of the block's final content line.
  pub last_line_start: u64,
}

/// Scan state for the block state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
  /// No block is currently open.
  Outside,
  /// A block opened at the recorded offset and has not yet closed.
  Inside { start: u64 },
}

/// Locates comment blocks in a stream, one call per block.
///
/// Constructed with the comment dialect of the file being scanned, or
/// `None` to use blank-line-delimited plain-text scanning.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use std::path::Path;
///
/// use copyscan::block::CommentBlockLocator;
/// use copyscan::dialect::markers_for_file;
/// use copyscan::scanner::LineScanner;
///
/// # fn main() -> anyhow::Result<()> {
/// let source = "/* Header comment\n */\n\nint main() {}\n";
/// let mut scanner = LineScanner::new(Cursor::new(source))?;
///
/// let locator = CommentBlockLocator::new(markers_for_file(Path::new("main.c")));
/// let block = locator.find_next_block(&mut scanner)?.unwrap();
/// assert_eq!(block.start, 0);
/// assert!(locator.find_next_block(&mut scanner)?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct CommentBlockLocator {
  /// The comment dialect, or `None` for plain-text scanning.
  markers: Option<CommentMarkers>,
}

impl CommentBlockLocator {
  /// Create a locator for the given dialect.
  ///
  /// # Arguments
  ///
  /// * `markers` - Dialect delimiter tokens, or `None` for plain-text mode
  pub const fn new(markers: Option<CommentMarkers>) -> Self {
    Self { markers }
  }

  /// Scan forward from the stream's current position for the next comment
  /// block.
  ///
  /// # Parameters
  ///
  /// * `scanner` - The line scanner to read from; scanning resumes from its
  ///   current position and leaves it wherever the search stopped
  ///
  /// # Returns
  ///
  /// The next block's location, or `None` once the end of the stream is
  /// reached without finding (or, in dialect mode, closing) a block.
  ///
  /// # Errors
  ///
  /// I/O faults from the stream are propagated.
  pub fn find_next_block<R: BufRead + Seek>(&self, scanner: &mut LineScanner<R>) -> Result<Option<BlockLocation>> {
    match &self.markers {
      Some(markers) => Self::find_dialect_block(markers, scanner),
      None => Self::find_text_block(scanner),
    }
  }

  /// Plain-text scan: a block is a maximal run of non-blank lines.
  ///
  /// The terminating blank line is excluded from the block, and end of
  /// stream closes an open block at the last line's end.
  fn find_text_block<R: BufRead + Seek>(scanner: &mut LineScanner<R>) -> Result<Option<BlockLocation>> {
    let mut state = ScanState::Outside;
    let mut previous: Option<ScannedLine> = None;

    loop {
      let Some(line) = scanner.next_line()? else {
        // End of stream closes an open block at the last line's end.
        let location = match (state, previous) {
          (ScanState::Inside { start }, Some(prev)) => Some(BlockLocation {
            start,
            end: prev.end_offset(),
            last_line_start: prev.offset,
          }),
          _ => None,
        };
        return Ok(location);
      };

      match state {
        ScanState::Outside => {
          if !is_blank(&line.text) {
            trace!("text block opens at offset {}", line.offset);
            state = ScanState::Inside { start: line.offset };
          }
        }
        ScanState::Inside { start } => {
          if is_blank(&line.text) {
            // The blank line is excluded: the block ends where it begins.
            let last_line_start = previous.map(|prev| prev.offset).unwrap_or(start);
            trace!("text block closes at offset {}", line.offset);
            return Ok(Some(BlockLocation {
              start,
              end: line.offset,
              last_line_start,
            }));
          }
        }
      }

      previous = Some(line);
    }
  }

  /// Dialect scan: paired open/close tokens plus single-line-marker runs.
  ///
  /// A block left open at end of stream is reported as not-found, matching
  /// the first-match-wins contract for malformed input.
  fn find_dialect_block<R: BufRead + Seek>(
    markers: &CommentMarkers,
    scanner: &mut LineScanner<R>,
  ) -> Result<Option<BlockLocation>> {
    let mut state = ScanState::Outside;
    let mut previous: Option<ScannedLine> = None;

    loop {
      let Some(line) = scanner.next_line()? else {
        return Ok(None);
      };

      match state {
        ScanState::Outside => {
          if Self::is_block_start(markers, &line) {
            trace!("block opens at offset {} ({:?})", line.offset, markers.block_start);
            state = ScanState::Inside { start: line.offset };
          } else if let Some(prev) = &previous
            && Self::is_marker_run(markers, prev, &line)
          {
            // Two consecutive single-line comments form an implicit block
            // opening at the first of them.
            trace!("marker run opens at offset {}", prev.offset);
            state = ScanState::Inside { start: prev.offset };
          }
        }
        ScanState::Inside { start } => {
          if Self::is_block_end(markers, &line) {
            trace!("block closes at offset {}", line.offset);
            return Ok(Some(BlockLocation {
              start,
              end: line.end_offset(),
              last_line_start: line.offset,
            }));
          }
          if let Some(prev) = &previous
            && Self::is_marker_run_end(markers, prev, &line)
          {
            trace!("marker run closes at offset {}", prev.offset);
            return Ok(Some(BlockLocation {
              start,
              end: prev.end_offset(),
              last_line_start: prev.offset,
            }));
          }
        }
      }

      previous = Some(line);
    }
  }

  /// The line opens a paired block: exact `block_start` prefix at column 0.
  fn is_block_start(markers: &CommentMarkers, line: &ScannedLine) -> bool {
    markers.block_start.as_ref().is_some_and(|token| line.text.starts_with(token))
  }

  /// The line closes a paired block: `block_end` anywhere in the line.
  fn is_block_end(markers: &CommentMarkers, line: &ScannedLine) -> bool {
    markers.block_end.as_ref().is_some_and(|token| line.text.contains(token))
  }

  /// Both the previous and current line carry the single-line marker.
  fn is_marker_run(markers: &CommentMarkers, previous: &ScannedLine, current: &ScannedLine) -> bool {
    previous.text.starts_with(&markers.single_line) && current.text.starts_with(&markers.single_line)
  }

  /// The previous line ended a single-line marker run.
  fn is_marker_run_end(markers: &CommentMarkers, previous: &ScannedLine, current: &ScannedLine) -> bool {
    previous.text.starts_with(&markers.single_line) && !current.text.starts_with(&markers.single_line)
  }
}

/// A line is blank when it has no non-whitespace character.
fn is_blank(text: &str) -> bool {
  text.trim().is_empty()
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;
  use std::path::Path;

  use super::*;
  use crate::dialect::markers_for_file;

  fn locator_for(name: &str) -> CommentBlockLocator {
    CommentBlockLocator::new(markers_for_file(Path::new(name)))
  }

  #[test]
  fn test_text_blocks_delimited_by_blank_lines() {
    let source = "\nFirst block line one\nline two\n\nSecond\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = CommentBlockLocator::new(None);

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 1);
    assert_eq!(block.end, 31);
    assert_eq!(block.last_line_start, 22);

    // Final block closes at end of stream
    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 32);
    assert_eq!(block.end, 39);
    assert_eq!(block.last_line_start, 32);

    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_text_block_excludes_terminating_blank_line() {
    let source = "only line\n\nrest\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = CommentBlockLocator::new(None);

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    // Ends at the blank line's start, not past it
    assert_eq!(block.end, 10);
    assert_eq!(block.last_line_start, 0);
  }

  #[test]
  fn test_text_blank_only_stream_has_no_block() {
    let mut scanner = LineScanner::new(Cursor::new("\n   \n\t\n")).unwrap();
    let locator = CommentBlockLocator::new(None);
    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_c_paired_block() {
    let source = "/* Header\n * Copyright (c) 2024 Tester\n */\nint main() {}\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    assert_eq!(block.end, 43);
    assert_eq!(block.last_line_start, 39);

    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_c_single_line_marker_run() {
    let source = "// a\n// b\nint x;\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    assert_eq!(block.end, 10);
    assert_eq!(block.last_line_start, 5);
  }

  #[test]
  fn test_lone_single_line_comment_is_not_a_block() {
    // A single marker line never forms a run
    let source = "// alone\nint x;\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");
    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_one_line_paired_comment_is_not_closed() {
    // The opening line is never also tested as the closing line
    let source = "/* one-liner */\nint x;\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");
    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_unterminated_paired_block_reports_not_found() {
    let source = "/* opened\n * but never closed\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");
    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_shell_prefix_runs() {
    let source = "#!/bin/bash\n# c1\n# c2\necho hi\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("run.sh");

    // The shebang line starts with '#' and so joins the first run
    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    assert_eq!(block.end, 22);
    assert_eq!(block.last_line_start, 17);

    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }

  #[test]
  fn test_batch_rem_runs() {
    let source = "REM one\nREM two\n@echo off\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("build.bat");

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    assert_eq!(block.end, 16);
    assert_eq!(block.last_line_start, 8);
  }

  #[test]
  fn test_python_docstring_block() {
    let source = "\"\"\"\ndoc line\n\"\"\"\nimport os\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("mod.py");

    let block = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(block.start, 0);
    assert_eq!(block.end, 17);
    assert_eq!(block.last_line_start, 13);
  }

  #[test]
  fn test_successive_blocks_resume_from_cursor() {
    let source = "/* first\n */\n// a\n// b\ncode\n";
    let mut scanner = LineScanner::new(Cursor::new(source)).unwrap();
    let locator = locator_for("main.c");

    let first = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(first.start, 0);
    assert_eq!(first.end, 13);

    let second = locator.find_next_block(&mut scanner).unwrap().unwrap();
    assert_eq!(second.start, 13);
    assert_eq!(second.end, 23);
    assert_eq!(second.last_line_start, 18);

    assert!(locator.find_next_block(&mut scanner).unwrap().is_none());
  }
}
