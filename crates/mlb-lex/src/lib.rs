//! Lexing build-description (ML Basis) files.
//!
//! The interesting tokens are file paths. Comments and string constants are
//! the main language's, via the shared `lex-util` machinery, and are wrapped
//! as tokens of this lexer with the same span.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]


use lex_util::{advance_while, block_comment, is_whitespace, string};
use source_file::{mk_text_size, SourceFile};
use std::fmt;
use text_size::{TextRange, TextSize};

/// A token of the build-description language.
pub type Token<'a> = sml_token::Token<'a, TokenKind>;

/// A kind of build-description token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A reserved word or punctuation.
  Reserved(Reserved),
  /// A file path, like `foo/bar.sml`.
  Path(PathKind),
  /// A plain name, like a basis binding's. A name-shaped word at the very
  /// head of the file is not a `Name` but a path attempt, since a build
  /// description never begins with a binding name.
  Name,
  /// A block comment, as in the main language.
  BlockComment,
  /// A string constant, as in the main language.
  StringLit,
}

/// The reserved forms of the build-description language.
///
/// A word is reserved only when the maximal run of path-constituent bytes is
/// exactly the word, so e.g. `basis.mlb` stays a path and `bas` directly
/// followed by `is` is `basis`, not `bas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Reserved {
  And,
  Ann,
  Bas,
  Basis,
  End,
  Eq,
  Functor,
  In,
  Let,
  Local,
  Open,
  Semicolon,
  Signature,
  Structure,
  UnderscorePrim,
}

impl Reserved {
  /// Returns the textual form.
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Reserved::And => "and",
      Reserved::Ann => "ann",
      Reserved::Bas => "bas",
      Reserved::Basis => "basis",
      Reserved::End => "end",
      Reserved::Eq => "=",
      Reserved::Functor => "functor",
      Reserved::In => "in",
      Reserved::Let => "let",
      Reserved::Local => "local",
      Reserved::Open => "open",
      Reserved::Semicolon => ";",
      Reserved::Signature => "signature",
      Reserved::Structure => "structure",
      Reserved::UnderscorePrim => "_prim",
    }
  }

  fn word(s: &str) -> Option<Self> {
    let ret = match s {
      "and" => Reserved::And,
      "ann" => Reserved::Ann,
      "bas" => Reserved::Bas,
      "basis" => Reserved::Basis,
      "end" => Reserved::End,
      "functor" => Reserved::Functor,
      "in" => Reserved::In,
      "let" => Reserved::Let,
      "local" => Reserved::Local,
      "open" => Reserved::Open,
      "signature" => Reserved::Signature,
      "structure" => Reserved::Structure,
      "_prim" => Reserved::UnderscorePrim,
      _ => return None,
    };
    Some(ret)
  }
}

impl fmt::Display for Reserved {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A kind of path the build description knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
  /// Main-language paths: `.sml`, `.sig`, `.fun`.
  Sml,
  /// Build-description paths: `.mlb`.
  Mlb,
}

/// A kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
  InvalidSource,
  UnclosedComment,
  MissingOrInvalidExtension,
  String(string::Error),
}

/// An error encountered when lexing.
#[derive(Debug)]
pub struct Error {
  range: TextRange,
  kind: ErrorKind,
}

impl Error {
  /// Returns the range of the offending bytes.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }

  /// Returns a stable code for this.
  #[must_use]
  pub fn code(&self) -> u16 {
    match self.kind {
      ErrorKind::InvalidSource => 3001,
      ErrorKind::UnclosedComment => 3002,
      ErrorKind::MissingOrInvalidExtension => 3003,
      ErrorKind::String(string::Error::Unclosed) => 3004,
      ErrorKind::String(string::Error::InvalidEscape) => 3005,
      ErrorKind::String(string::Error::NonWhitespaceInContinuation) => 3006,
    }
  }

  /// Returns a longer explanation, for the kinds that have one.
  #[must_use]
  pub fn explain(&self) -> Option<&'static str> {
    match self.kind {
      ErrorKind::MissingOrInvalidExtension => {
        Some("Paths must end in `.mlb`, `.sml`, `.sig`, or `.fun`.")
      }
      _ => None,
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      ErrorKind::InvalidSource => f.write_str("invalid source character"),
      ErrorKind::UnclosedComment => f.write_str("unclosed comment"),
      ErrorKind::MissingOrInvalidExtension => {
        f.write_str("missing or invalid file extension in path")
      }
      ErrorKind::String(string::Error::Unclosed) => f.write_str("unclosed string constant"),
      ErrorKind::String(string::Error::InvalidEscape) => f.write_str("invalid string escape"),
      ErrorKind::String(string::Error::NonWhitespaceInContinuation) => {
        f.write_str("non-whitespace in string continuation")
      }
    }
  }
}

/// Returns all the tokens of the file, comments included.
///
/// # Errors
///
/// On the first malformed input, with the range of the offending bytes.
pub fn get(file: &SourceFile) -> Result<Vec<Token<'_>>, Error> {
  let mut tokens = Vec::<Token<'_>>::new();
  let mut idx = 0usize;
  while let Some(tok) = advance(file, &mut idx)? {
    tokens.push(tok);
  }
  Ok(tokens)
}

/// Returns the next token at or after `start`, or `None` when only
/// whitespace remains.
///
/// # Errors
///
/// If the bytes at the front of the remainder are malformed.
pub fn next(file: &SourceFile, start: TextSize) -> Result<Option<Token<'_>>, Error> {
  let mut idx = usize::from(start);
  advance(file, &mut idx)
}

fn advance<'sf>(file: &'sf SourceFile, idx: &mut usize) -> Result<Option<Token<'sf>>, Error> {
  let s = file.as_str();
  advance_while(idx, s.as_bytes(), is_whitespace);
  let start = *idx;
  if *idx >= s.len() {
    return Ok(None);
  }
  let kind = token(idx, s)?;
  assert!(start < *idx, "lexer failed to advance");
  let range = TextRange::new(mk_text_size(start), mk_text_size(*idx));
  Ok(Some(Token { kind, text: file.slice(range), range }))
}

fn token(idx: &mut usize, s: &str) -> Result<TokenKind, Error> {
  let bs = s.as_bytes();
  let start = *idx;
  match block_comment::get(idx, bs) {
    Ok(true) => return Ok(TokenKind::BlockComment),
    Ok(false) => {}
    Err(block_comment::UnclosedError) => return Err(err(start, *idx, ErrorKind::UnclosedComment)),
  }
  match bs[start] {
    b'"' => {
      string::get(idx, bs)
        .map_err(|(at, e)| err(at, (at + 1).min(bs.len()), ErrorKind::String(e)))?;
      return Ok(TokenKind::StringLit);
    }
    b';' => {
      *idx += 1;
      return Ok(TokenKind::Reserved(Reserved::Semicolon));
    }
    b'=' => {
      *idx += 1;
      return Ok(TokenKind::Reserved(Reserved::Eq));
    }
    _ => {}
  }
  advance_while(idx, bs, path_byte);
  if start == *idx {
    *idx += 1;
    while !s.is_char_boundary(*idx) {
      *idx += 1;
    }
    return Err(err(start, *idx, ErrorKind::InvalidSource));
  }
  let got = &s[start..*idx];
  if let Some(r) = Reserved::word(got) {
    return Ok(TokenKind::Reserved(r));
  }
  // A name-shaped word reads as a binding name, except at the head of the
  // file. A build description never begins with a binding name, so a
  // leading bare word can only have been meant as a path, and it falls
  // through to the extension check. This is what makes `foo` alone an
  // error while the `is` after `bas foo.mlb` is a name.
  let leading = s[..start].bytes().all(is_whitespace);
  if is_name_shaped(got) && !leading {
    return Ok(TokenKind::Name);
  }
  match path_kind(got) {
    Some(kind) => Ok(TokenKind::Path(kind)),
    None => Err(err(start, *idx, ErrorKind::MissingOrInvalidExtension)),
  }
}

/// Bytes that may appear in an unquoted path: the name bytes, plus
/// separators, dashes, and the `$(VAR)` form.
fn path_byte(b: u8) -> bool {
  name_byte(b) || matches!(b, b'.' | b'/' | b'-' | b'$' | b'(' | b')')
}

/// Bytes that may appear after the head of a name in the main language's
/// sense.
fn name_byte(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'\''
}

/// A whole name: a letter, then name bytes.
fn is_name_shaped(s: &str) -> bool {
  let mut bytes = s.bytes();
  bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) && bytes.all(name_byte)
}

/// A successful path contains `.` or `/` and carries a recognized
/// extension.
fn path_kind(s: &str) -> Option<PathKind> {
  if !s.contains(['.', '/']) {
    return None;
  }
  let ret = match s.rsplit('.').next()? {
    "sml" | "sig" | "fun" => PathKind::Sml,
    "mlb" => PathKind::Mlb,
    _ => return None,
  };
  Some(ret)
}

fn err(start: usize, end: usize, kind: ErrorKind) -> Error {
  Error { range: TextRange::new(mk_text_size(start), mk_text_size(end)), kind }
}
