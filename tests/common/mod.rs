#![allow(dead_code)]

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use copyscan::scanner::LineScanner;
use tempfile::TempDir;

/// Installs a tracing subscriber for test output.
///
/// Safe to call from every test; only the first call installs. Filtering
/// follows `RUST_LOG`.
pub fn init_tracing() {
  use tracing_subscriber::EnvFilter;

  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

/// Writes a fixture file into the given temp directory.
pub fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
  let path = dir.path().join(name);
  fs::write(&path, content).with_context(|| format!("Failed to write fixture {}", path.display()))?;
  Ok(path)
}

/// Opens a fixture file as a line scanner.
pub fn open_scanner(path: &Path) -> Result<LineScanner<BufReader<File>>> {
  let file = File::open(path).with_context(|| format!("Failed to open fixture {}", path.display()))?;
  Ok(LineScanner::new(BufReader::new(file))?)
}

/// A C source whose header is a `/* ... */` license block immediately
/// followed by a `/** ... */` doc block.
///
/// Golden byte offsets:
/// - license block: start 0, end 57, last line start 53
/// - doc block: start 57, end 112, last line start 108
/// - copyright line at offset 3, 50 bytes long
pub const C_TWO_BLOCK_FIXTURE: &str = concat!(
  "/*\n",
  " * Copyright (c) 2022-2024 ACME Corp            *\n",
  " */\n",
  "/**\n",
  " * @file widget.c\n",
  " * @brief Widget maintenance\n",
  " */\n",
  "\n",
  "int widget_count = 0;\n",
);

/// A shell script with a shebang run and a separated comment run.
pub const SH_FIXTURE: &str = concat!(
  "#!/bin/bash\n",
  "# Copyright (c) 2023 ACME Corp\n",
  "\n",
  "# helper section\n",
  "# not a notice\n",
  "echo done\n",
);

/// A batch file with one `REM` comment run.
pub const BAT_FIXTURE: &str = concat!(
  "REM Copyright (c) 2023 ACME Corp\n",
  "REM Build helper\n",
  "@echo off\n",
);

/// A python module with a docstring header block.
pub const PY_FIXTURE: &str = concat!(
  "\"\"\"Widget module.\n",
  "Copyright (c) 2023 ACME Corp\n",
  "\"\"\"\n",
  "import os\n",
);
