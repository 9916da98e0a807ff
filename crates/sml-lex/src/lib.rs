//! Lexing the main language into tokens.
//!
//! Comments are emitted as tokens, so that the token sequence concatenated
//! with the inter-token whitespace reproduces the input. The parser works on
//! a comment-filtered view; tooling keeps the full sequence.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![allow(clippy::too_many_lines)]

#[cfg(test)]
mod tests;

use lex_util::{advance_while, block_comment, is_whitespace, string};
use sml_token::{IntBase, Reserved, TokenKind, PUNCTUATION};
use source_file::{mk_text_size, SourceFile};
use std::fmt;
use text_size::{TextRange, TextSize};

/// A token of the main language.
pub type Token<'a> = sml_token::Token<'a, TokenKind>;

/// A kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
  InvalidSource,
  UnclosedComment,
  IncompleteTyVar,
  IncompleteLongIdentifier,
  NegativeWordLit,
  WrongLenCharLit,
  MissingDigitsInNumLit,
  InvalidNumSuffix,
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
      ErrorKind::InvalidSource => 2001,
      ErrorKind::UnclosedComment => 2002,
      ErrorKind::IncompleteTyVar => 2003,
      ErrorKind::String(string::Error::Unclosed) => 2004,
      ErrorKind::NegativeWordLit => 2005,
      ErrorKind::WrongLenCharLit => 2006,
      ErrorKind::MissingDigitsInNumLit => 2007,
      ErrorKind::String(string::Error::InvalidEscape) => 2008,
      ErrorKind::String(string::Error::NonWhitespaceInContinuation) => 2009,
      ErrorKind::IncompleteLongIdentifier => 2010,
      ErrorKind::InvalidNumSuffix => 2011,
    }
  }

  /// Returns a longer explanation, for the kinds that have one.
  #[must_use]
  pub fn explain(&self) -> Option<&'static str> {
    match self.kind {
      ErrorKind::UnclosedComment => {
        Some("Comments start with `(*`, may be nested, and must be closed with `*)`.")
      }
      ErrorKind::String(string::Error::Unclosed) => {
        Some("String constants must be closed with `\"` before the end of the line or file.")
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
      ErrorKind::IncompleteTyVar => f.write_str("incomplete type variable"),
      ErrorKind::IncompleteLongIdentifier => {
        f.write_str("missing identifier after `.` in long identifier")
      }
      ErrorKind::NegativeWordLit => f.write_str("negative word constant"),
      ErrorKind::WrongLenCharLit => f.write_str("character constant must have length 1"),
      ErrorKind::MissingDigitsInNumLit => f.write_str("missing digits in number constant"),
      ErrorKind::InvalidNumSuffix => f.write_str("invalid character directly after number constant"),
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

/// Requires `bs[*idx]` to exist and not be whitespace. Consumes one token
/// and returns its kind.
fn token(idx: &mut usize, s: &str) -> Result<TokenKind, Error> {
  let bs = s.as_bytes();
  let start = *idx;
  let b = bs[start];
  match block_comment::get(idx, bs) {
    Ok(true) => return Ok(TokenKind::BlockComment),
    Ok(false) => {}
    Err(block_comment::UnclosedError) => return Err(err(start, *idx, ErrorKind::UnclosedComment)),
  }
  // type variables, like 'a and ''eq
  if b == b'\'' {
    *idx += 1;
    advance_while(idx, bs, is_alnum_ident);
    if start + 1 == *idx {
      return Err(err(start, *idx, ErrorKind::IncompleteTyVar));
    }
    return Ok(TokenKind::TyVar);
  }
  // alphanumeric identifiers, keywords, and long identifiers
  if b.is_ascii_alphabetic() {
    *idx += 1;
    advance_while(idx, bs, is_alnum_ident);
    if let Some(r) = Reserved::alpha(&s[start..*idx]) {
      return Ok(TokenKind::Reserved(r));
    }
    return long_identifier(idx, bs, start);
  }
  // numbers. note e.g. `~3` is one token but `~ 3` is two
  if b.is_ascii_digit() || (b == b'~' && bs.get(*idx + 1).is_some_and(u8::is_ascii_digit)) {
    return number(idx, bs, start);
  }
  // string constants
  if b == b'"' {
    get_string(idx, bs)?;
    return Ok(TokenKind::StringLit);
  }
  // character constants. `#` must also be checked before symbolic identifiers
  if b == b'#' && bs.get(*idx + 1) == Some(&b'"') {
    *idx += 1;
    let chars = get_string(idx, bs)?;
    if chars.len() != 1 {
      return Err(err(start, *idx, ErrorKind::WrongLenCharLit));
    }
    return Ok(TokenKind::CharLit);
  }
  // symbolic identifiers, which may turn out to be reserved forms
  if is_symbolic(b) {
    *idx += 1;
    advance_while(idx, bs, is_symbolic);
    let got = &s[start..*idx];
    return Ok(match Reserved::symbolic(got) {
      Some(r) => TokenKind::Reserved(r),
      None => TokenKind::Name { long: false },
    });
  }
  // punctuation
  if let Some(&(_, r)) = PUNCTUATION.iter().find(|&&(pb, _)| pb == b) {
    *idx += 1;
    return Ok(TokenKind::Reserved(r));
  }
  // invalid. consume one whole character so the error range is sensible
  *idx += 1;
  while !s.is_char_boundary(*idx) {
    *idx += 1;
  }
  Err(err(start, *idx, ErrorKind::InvalidSource))
}

/// Just consumed an alphanumeric identifier that was not a keyword. Consume
/// any `.`-separated continuation, in which every segment is alphanumeric
/// except possibly the last, which may be symbolic (as in `Int.+`).
fn long_identifier(idx: &mut usize, bs: &[u8], start: usize) -> Result<TokenKind, Error> {
  let mut long = false;
  while bs.get(*idx) == Some(&b'.') {
    long = true;
    *idx += 1;
    match bs.get(*idx) {
      Some(&c) if c.is_ascii_alphabetic() => {
        *idx += 1;
        advance_while(idx, bs, is_alnum_ident);
      }
      Some(&c) if is_symbolic(c) => {
        *idx += 1;
        advance_while(idx, bs, is_symbolic);
        break;
      }
      _ => return Err(err(start, *idx, ErrorKind::IncompleteLongIdentifier)),
    }
  }
  Ok(TokenKind::Name { long })
}

fn number(idx: &mut usize, bs: &[u8], start: usize) -> Result<TokenKind, Error> {
  let neg = bs[*idx] == b'~';
  if neg {
    *idx += 1;
  }
  let kind = if bs[*idx] == b'0' {
    *idx += 1;
    match bs.get(*idx) {
      // word, possibly hex
      Some(&b'w') => {
        *idx += 1;
        let base = if bs.get(*idx) == Some(&b'x') {
          *idx += 1;
          IntBase::Hex
        } else {
          IntBase::Dec
        };
        digits(idx, bs, start, base)?;
        if neg {
          return Err(err(start, *idx, ErrorKind::NegativeWordLit));
        }
        TokenKind::WordLit(base)
      }
      // hex int
      Some(&b'x') => {
        *idx += 1;
        digits(idx, bs, start, IntBase::Hex)?;
        TokenKind::IntLit(IntBase::Hex)
      }
      // dec int or real that happens to start with 0
      Some(_) => decimal(idx, bs),
      None => TokenKind::IntLit(IntBase::Dec),
    }
  } else {
    decimal(idx, bs)
  };
  if bs.get(*idx).is_some_and(|&b| is_alnum_ident(b)) {
    return Err(err(start, *idx + 1, ErrorKind::InvalidNumSuffix));
  }
  Ok(kind)
}

/// A decimal numeral, continuing into a real constant on `.` or an exponent.
fn decimal(idx: &mut usize, bs: &[u8]) -> TokenKind {
  advance_while(idx, bs, |b| b.is_ascii_digit());
  let mut kind = TokenKind::IntLit(IntBase::Dec);
  if bs.get(*idx) == Some(&b'.') && bs.get(*idx + 1).is_some_and(u8::is_ascii_digit) {
    kind = TokenKind::RealLit;
    *idx += 1;
    advance_while(idx, bs, |b| b.is_ascii_digit());
  }
  if let Some(&b'e' | &b'E') = bs.get(*idx) {
    // an exponent only if digits follow, so that `3 e` stays two tokens
    let mut after = *idx + 1;
    if bs.get(after) == Some(&b'~') {
      after += 1;
    }
    if bs.get(after).is_some_and(u8::is_ascii_digit) {
      kind = TokenKind::RealLit;
      *idx = after;
      advance_while(idx, bs, |b| b.is_ascii_digit());
    }
  }
  kind
}

fn digits(idx: &mut usize, bs: &[u8], start: usize, base: IntBase) -> Result<(), Error> {
  let valid: fn(u8) -> bool = match base {
    IntBase::Dec => |b| b.is_ascii_digit(),
    IntBase::Hex => |b| b.is_ascii_hexdigit(),
  };
  let s = *idx;
  advance_while(idx, bs, valid);
  if s == *idx {
    return Err(err(start, *idx, ErrorKind::MissingDigitsInNumLit));
  }
  Ok(())
}

fn get_string(idx: &mut usize, bs: &[u8]) -> Result<Vec<u8>, Error> {
  string::get(idx, bs).map_err(|(at, e)| err(at, (at + 1).min(bs.len()), ErrorKind::String(e)))
}

fn is_alnum_ident(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'\''
}

fn is_symbolic(b: u8) -> bool {
  matches!(
    b,
    b'!'
      | b'%'
      | b'&'
      | b'$'
      | b'#'
      | b'+'
      | b'-'
      | b'/'
      | b':'
      | b'<'
      | b'='
      | b'>'
      | b'?'
      | b'@'
      | b'\\'
      | b'~'
      | b'`'
      | b'^'
      | b'|'
      | b'*'
  )
}

fn err(start: usize, end: usize, kind: ErrorKind) -> Error {
  Error { range: TextRange::new(mk_text_size(start), mk_text_size(end)), kind }
}
