//! Source files and byte-offset positions within them.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};
use text_size::{TextRange, TextSize};

/// A source file: its name, its full text, and a derived line index.
///
/// All positions into the file are byte offsets; line and column are
/// computed on demand.
#[derive(Debug)]
pub struct SourceFile {
  name: PathBuf,
  text: String,
  /// Byte offsets at which each line starts. Always begins with 0.
  line_starts: Vec<TextSize>,
}

impl SourceFile {
  /// Returns a new source file over the given text.
  #[must_use]
  pub fn new(name: PathBuf, text: String) -> Self {
    let mut line_starts = vec![TextSize::new(0)];
    for (i, b) in text.bytes().enumerate() {
      if b == b'\n' {
        line_starts.push(mk_text_size(i + 1));
      }
    }
    Self { name, text, line_starts }
  }

  /// Returns the file name.
  #[must_use]
  pub fn name(&self) -> &Path {
    self.name.as_path()
  }

  /// Returns the whole text.
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.text.as_str()
  }

  /// Returns the length of the text.
  #[must_use]
  pub fn len(&self) -> TextSize {
    mk_text_size(self.text.len())
  }

  /// Returns whether the text is empty.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Returns the slice of the text at `range`.
  ///
  /// # Panics
  ///
  /// If `range` is out of bounds for the text.
  #[must_use]
  pub fn slice(&self, range: TextRange) -> &str {
    &self.text[range]
  }

  /// Returns the line and column for `offset`.
  ///
  /// # Panics
  ///
  /// If `offset` is past the end of the text.
  #[must_use]
  pub fn position(&self, offset: TextSize) -> Position {
    assert!(offset <= self.len(), "offset out of range");
    // index of the last line start at or before `offset`
    let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
    let col = offset - self.line_starts[idx];
    Position { line: mk_u32(idx) + 1, col: u32::from(col) + 1 }
  }

  /// Returns the range of the 1-based `line`, including its terminating
  /// newline if any.
  ///
  /// # Panics
  ///
  /// If there is no such line.
  #[must_use]
  pub fn line_range(&self, line: u32) -> TextRange {
    let idx = line.checked_sub(1).expect("line numbers are 1-based") as usize;
    let start = self.line_starts[idx];
    let end = self.line_starts.get(idx + 1).copied().unwrap_or_else(|| self.len());
    TextRange::new(start, end)
  }
}

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
  /// The line, starting at 1.
  pub line: u32,
  /// The column, starting at 1. A byte-based column.
  pub col: u32,
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.col)
  }
}

/// Makes a text size or panics. Panics if the usize overflows a u32.
#[must_use]
pub fn mk_text_size(n: usize) -> TextSize {
  TextSize::try_from(n).expect("could not make text size")
}

fn mk_u32(n: usize) -> u32 {
  u32::try_from(n).expect("could not make u32")
}
