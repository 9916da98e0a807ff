//! Diagnostics (colloquially, "errors") reported by the front end.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

use source_file::SourceFile;
use std::fmt;
use text_size::TextRange;

/// The header under which a diagnostic is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
  /// A lexical error.
  Syntax,
  /// A grammatical error.
  Parse,
  /// A recognized but unsupported form.
  NotYetImplemented,
}

impl fmt::Display for Header {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Header::Syntax => f.write_str("SYNTAX ERROR"),
      Header::Parse => f.write_str("PARSE ERROR"),
      Header::NotYetImplemented => f.write_str("ERROR: NOT YET IMPLEMENTED"),
    }
  }
}

/// The severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
  /// Warning. Should probably address.
  Warning,
  /// Error. Pretty much means the file cannot be processed.
  Error,
}

/// A stable numeric code for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code(u16);

impl Code {
  /// Returns a Code for this.
  #[must_use]
  pub fn n(n: u16) -> Self {
    Self(n)
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// A rendered-ready diagnostic.
#[derive(Debug)]
pub struct Diagnostic {
  /// The header.
  pub header: Header,
  /// The range of the offending source.
  pub range: TextRange,
  /// The short message.
  pub message: String,
  /// An optional longer explanation.
  pub explain: Option<&'static str>,
  /// The code.
  pub code: Code,
}

/// Renders a diagnostic against the file it arose from, with the offending
/// line and a caret underline.
#[must_use]
pub fn show(d: &Diagnostic, file: &SourceFile) -> String {
  use std::fmt::Write as _;
  let pos = file.position(d.range.start());
  let mut out = String::new();
  writeln!(out, "-- {}: {} ----------", d.header, file.name().display()).unwrap();
  writeln!(out, "{pos}: error[{}]: {}", d.code, d.message).unwrap();
  let line_range = file.line_range(pos.line);
  let line = file.slice(line_range).trim_end_matches('\n');
  writeln!(out, "  {line}").unwrap();
  let start = usize::from(d.range.start() - line_range.start());
  let len = usize::from(d.range.len()).clamp(1, line.len().saturating_sub(start).max(1));
  writeln!(out, "  {}{}", " ".repeat(start), "^".repeat(len)).unwrap();
  if let Some(explain) = d.explain {
    writeln!(out, "{explain}").unwrap();
  }
  out
}
