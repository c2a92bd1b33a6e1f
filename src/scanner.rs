//! # Line Scanner Module
//!
//! This module provides the low-level stream primitive used by every scanner
//! in the crate: reading one line at a time from a caller-owned seekable
//! stream while reporting the byte offset at which each line began.
//!
//! The scanner never opens or closes the underlying stream; it only reads
//! and seeks. Offsets are byte offsets from the start of the stream, so
//! `offset + text.len()` of a returned line is always the offset of the
//! following line.

use std::io::{BufRead, Seek, SeekFrom};

/// A single line read from a stream together with its starting byte offset.
///
/// The line text retains its trailing newline (if the stream contained one),
/// so [`end_offset`](Self::end_offset) lands exactly on the start of the
/// next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
  /// Byte offset at which this line began.
  pub offset: u64,
  /// The line content, including the trailing newline when present.
  pub text: String,
}

impl ScannedLine {
  /// Returns the byte length of the line, including the trailing newline.
  pub fn len(&self) -> u64 {
    self.text.len() as u64
  }

  /// Returns `true` if the line is empty (only possible at end of stream).
  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Returns the byte offset immediately after this line, i.e. the offset at
  /// which the next line begins.
  pub fn end_offset(&self) -> u64 {
    self.offset + self.len()
  }
}

/// Offset-tracking line reader over a caller-owned seekable stream.
///
/// The scanner keeps its own logical position so that reading a line never
/// has to re-query the stream for its cursor. Seeking through the scanner
/// keeps the tracked position and the stream cursor in sync.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// use copyscan::scanner::LineScanner;
///
/// # fn main() -> std::io::Result<()> {
/// let mut scanner = LineScanner::new(Cursor::new("first\nsecond\n"))?;
///
/// let line = scanner.next_line()?.unwrap();
/// assert_eq!(line.offset, 0);
/// assert_eq!(line.text, "first\n");
///
/// let line = scanner.next_line()?.unwrap();
/// assert_eq!(line.offset, 6);
/// assert!(scanner.next_line()?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct LineScanner<R> {
  /// The wrapped stream.
  inner: R,
  /// Logical byte position of the next read.
  position: u64,
}

impl<R: BufRead + Seek> LineScanner<R> {
  /// Creates a scanner over the given stream, resuming from the stream's
  /// current position.
  ///
  /// # Parameters
  ///
  /// * `inner` - The stream to scan; ownership of the handle stays with the
  ///   scanner only for the scanner's lifetime
  ///
  /// # Errors
  ///
  /// Returns an error if the stream's current position cannot be queried.
  pub fn new(mut inner: R) -> std::io::Result<Self> {
    let position = inner.stream_position()?;
    Ok(Self { inner, position })
  }

  /// Returns the byte offset at which the next line will begin.
  pub const fn position(&self) -> u64 {
    self.position
  }

  /// Seeks to an absolute byte offset.
  ///
  /// # Parameters
  ///
  /// * `offset` - Absolute byte offset from the start of the stream
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying seek fails.
  pub fn seek_to(&mut self, offset: u64) -> std::io::Result<()> {
    self.inner.seek(SeekFrom::Start(offset))?;
    self.position = offset;
    Ok(())
  }

  /// Seeks back to the start of the stream.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying seek fails.
  pub fn rewind(&mut self) -> std::io::Result<()> {
    self.seek_to(0)
  }

  /// Reads the next line and reports the offset at which it began.
  ///
  /// # Returns
  ///
  /// `Some(ScannedLine)` with the line text (trailing newline included) and
  /// its starting offset, or `None` at end of stream.
  ///
  /// # Errors
  ///
  /// I/O faults from the underlying stream are propagated unmodified.
  pub fn next_line(&mut self) -> std::io::Result<Option<ScannedLine>> {
    let offset = self.position;
    let mut text = String::new();
    let read = self.inner.read_line(&mut text)?;
    if read == 0 {
      return Ok(None);
    }
    self.position = offset + read as u64;
    Ok(Some(ScannedLine { offset, text }))
  }

  /// Releases the scanner, returning the wrapped stream.
  pub fn into_inner(self) -> R {
    self.inner
  }
}
