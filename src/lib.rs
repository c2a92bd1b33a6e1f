//! # copyscan
//!
//! A library for locating copyright notices embedded in source-file header
//! comments and rewriting their year ranges and ownership while preserving
//! the surrounding comment decoration byte for byte.
//!
//! `copyscan` works over heterogeneous codebases: C/C++ headers and
//! sources, scripting files, batch files and plain text. It finds the
//! boundaries of a file's comment blocks regardless of comment dialect,
//! finds copyright-message lines inside them, parses a copyright line into
//! its structural fields, and synthesizes an updated line for new
//! creation/modification years or ownership.
//!
//! ## Features
//!
//! * Comment-block boundary detection for paired-delimiter dialects
//!   (`/* */`, `""" """`), line-prefix dialects (`#`, `REM `) and
//!   blank-line-delimited plain text, with byte-exact offset reporting
//! * Copyright-line parsing parameterized by field patterns and field
//!   order (message-first or owner-first), with strict relative-order
//!   validation
//! * Year-range updates that never advance a recorded start year, and
//!   ownership flows (append a co-owner, hand off to a new owner at a
//!   transition year)
//! * Decoration preservation: regenerated lines keep their leading
//!   indentation and their trailing box-drawing column
//! * TOML configuration for user-defined comment dialects
//!
//! The library produces the `(old_text, new_text)` pair that drives a
//! rewrite; executing the replacement, reading filesystem or VCS
//! timestamps, and any CLI surface are left to the embedding application.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use std::path::Path;
//!
//! use copyscan::dialect::markers_for_file;
//! use copyscan::generator::CopyrightGenerator;
//! use copyscan::grammar::CopyrightGrammar;
//! use copyscan::orchestrator::CopyrightBlockScanner;
//! use copyscan::scanner::LineScanner;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("src/main.c");
//!     let mut scanner = LineScanner::new(BufReader::new(File::open(path)?))?;
//!
//!     // Find every comment block and the copyright lines it contains
//!     let grammar = CopyrightGrammar::english();
//!     let block_scanner = CopyrightBlockScanner::new(markers_for_file(path), &grammar);
//!     let records = block_scanner.scan(&mut scanner)?;
//!
//!     // Update the most relevant notice for new years
//!     if let Some(line) = records.iter().flat_map(|r| r.lines.iter()).next_back() {
//!         let old_text = line.text.trim_end();
//!
//!         let mut generator = CopyrightGenerator::new(&grammar);
//!         generator.load(old_text);
//!
//!         let (changed, new_text) = generator.new_message(2021, Some(2025));
//!         if changed {
//!             // Hand (old_text, new_text) to your replacement facility
//!             println!("{old_text} -> {new_text}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`scanner`] - Offset-reporting line reads over a seekable stream
//! * [`dialect`] - Comment-delimiter registry and dialect resolution
//! * [`config`] - User-defined dialects from a TOML file
//! * [`block`] - Comment-block boundary location
//! * [`grammar`] - Copyright-line parsing and regeneration
//! * [`finder`] - Copyright-line search over streams and offset windows
//! * [`generator`] - Year/ownership update decisions and message synthesis
//! * [`orchestrator`] - Per-block copyright records for a whole file

// Re-export modules for public API
pub mod block;
pub mod config;
pub mod dialect;
pub mod finder;
pub mod generator;
pub mod grammar;
pub mod orchestrator;
pub mod scanner;
