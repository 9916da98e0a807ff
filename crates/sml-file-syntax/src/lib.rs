//! See [`SourceFileSyntax`].

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

#[cfg(test)]
mod tests;

use source_file::SourceFile;
use std::fmt;
use text_size::TextRange;

/// A source file analyzed at the purely syntactic level.
#[derive(Debug)]
pub struct SourceFileSyntax<'a> {
  /// Every token of the file, comments included. Tooling that needs to
  /// reproduce or transform the file works from these.
  pub tokens: Vec<sml_lex::Token<'a>>,
  /// The concrete syntax tree, parsed from the comment-filtered view of
  /// `tokens`.
  pub parse: sml_cst::Dec<'a>,
}

impl<'a> SourceFileSyntax<'a> {
  /// Lexes and parses a single source file.
  ///
  /// # Errors
  ///
  /// On the first lexical or grammatical error.
  pub fn new(file: &'a SourceFile, fix_env: &mut sml_fixity::Env) -> Result<Self, Error> {
    let tokens = sml_lex::get(file).map_err(Error::Lex)?;
    let filtered: Vec<_> = tokens.iter().copied().filter(|tok| !tok.is_comment()).collect();
    let parse = sml_parse::get(&filtered, fix_env).map_err(Error::Parse)?;
    Ok(Self { tokens, parse })
  }
}

/// An error from either phase.
#[derive(Debug)]
pub enum Error {
  /// A lexical error.
  Lex(sml_lex::Error),
  /// A grammatical error.
  Parse(sml_parse::Error),
}

impl Error {
  /// Returns the range of the offending source.
  #[must_use]
  pub fn range(&self) -> TextRange {
    match self {
      Error::Lex(e) => e.range(),
      Error::Parse(e) => e.range(),
    }
  }

  /// Returns this as a renderable diagnostic.
  #[must_use]
  pub fn diagnostic(&self) -> diagnostic::Diagnostic {
    match self {
      Error::Lex(e) => diagnostic::Diagnostic {
        header: diagnostic::Header::Syntax,
        range: e.range(),
        message: e.to_string(),
        explain: e.explain(),
        code: diagnostic::Code::n(e.code()),
      },
      Error::Parse(e) => diagnostic::Diagnostic {
        header: e.header(),
        range: e.range(),
        message: e.to_string(),
        explain: e.explain(),
        code: diagnostic::Code::n(e.code()),
      },
    }
  }

  /// Renders this against the file it arose from.
  #[must_use]
  pub fn show(&self, file: &SourceFile) -> String {
    diagnostic::show(&self.diagnostic(), file)
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::Lex(e) => e.fmt(f),
      Error::Parse(e) => e.fmt(f),
    }
  }
}
