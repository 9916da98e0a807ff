//! The parser state: a cursor over the tokens, plus the fixity environment
//! in force at the cursor.

use sml_cst::Token;
use sml_token::{Reserved, TokenKind};
use std::fmt;
use text_size::TextRange;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub(crate) struct Parser<'a, 'e> {
  /// The tokens borrow the file text for `'a`; the slice itself only needs
  /// to live for the parse.
  tokens: &'e [Token<'a>],
  idx: usize,
  last_range: TextRange,
  pub(crate) fix_env: &'e mut sml_fixity::Env,
}

impl<'a, 'e> Parser<'a, 'e> {
  pub(crate) fn new(tokens: &'e [Token<'a>], fix_env: &'e mut sml_fixity::Env) -> Self {
    Self { tokens, idx: 0, last_range: TextRange::default(), fix_env }
  }

  pub(crate) fn peek(&self) -> Option<Token<'a>> {
    self.tokens.get(self.idx).copied()
  }

  pub(crate) fn peek_n(&self, n: usize) -> Option<Token<'a>> {
    self.tokens.get(self.idx + n).copied()
  }

  /// Consumes and returns the current token.
  ///
  /// # Panics
  ///
  /// If there are no tokens left. Callers only bump after a peek.
  pub(crate) fn bump(&mut self) -> Token<'a> {
    let tok = self.peek().expect("bump past the end of the tokens");
    self.last_range = tok.range;
    self.idx += 1;
    tok
  }

  /// Returns the number of tokens consumed so far.
  pub(crate) fn consumed(&self) -> usize {
    self.idx
  }

  pub(crate) fn at(&self, r: Reserved) -> bool {
    self.peek().is_some_and(|tok| tok.kind == TokenKind::Reserved(r))
  }

  pub(crate) fn eat(&mut self, r: Reserved) -> Result<Token<'a>> {
    if self.at(r) {
      Ok(self.bump())
    } else {
      Err(self.err_here(ErrorKind::Expected(Expected::Reserved(r))))
    }
  }

  /// An error at the current token, or just past the last consumed token
  /// when at the end.
  pub(crate) fn err_here(&self, kind: ErrorKind) -> Error {
    let range = self.peek().map_or(self.last_range, |tok| tok.range);
    Error { range, kind }
  }

  pub(crate) fn err_at(&self, range: TextRange, kind: ErrorKind) -> Error {
    Error { range, kind }
  }
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
  Expected(Expected),
  InfixWithoutOp,
  AmbiguousInfix,
  InvalidFixity(std::num::ParseIntError),
  NegativeFixity,
  Unsupported(&'static str),
}

#[derive(Debug)]
pub(crate) enum Expected {
  Exp,
  Pat,
  Ty,
  Dec,
  Name,
  TyCon,
  TyVar,
  LRoundExpTail,
  Reserved(Reserved),
}

impl fmt::Display for Expected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Expected::Exp => f.write_str("an expression"),
      Expected::Pat => f.write_str("a pattern"),
      Expected::Ty => f.write_str("a type"),
      Expected::Dec => f.write_str("a declaration"),
      Expected::Name => f.write_str("a name"),
      Expected::TyCon => f.write_str("a type constructor"),
      Expected::TyVar => f.write_str("a type variable"),
      Expected::LRoundExpTail => f.write_str("`)`, `,`, or `;`"),
      Expected::Reserved(r) => write!(f, "`{r}`"),
    }
  }
}

/// An error encountered when parsing.
#[derive(Debug)]
pub struct Error {
  range: TextRange,
  kind: ErrorKind,
}

impl Error {
  pub(crate) fn new(range: TextRange, kind: ErrorKind) -> Self {
    Self { range, kind }
  }

  /// Returns the range of the offending token.
  #[must_use]
  pub fn range(&self) -> TextRange {
    self.range
  }

  /// Returns the header under which to report this.
  #[must_use]
  pub fn header(&self) -> diagnostic::Header {
    match self.kind {
      ErrorKind::Unsupported(_) => diagnostic::Header::NotYetImplemented,
      _ => diagnostic::Header::Parse,
    }
  }

  /// Returns a stable code for this.
  #[must_use]
  pub fn code(&self) -> u16 {
    match self.kind {
      ErrorKind::Expected(_) => 4001,
      ErrorKind::InfixWithoutOp => 4002,
      ErrorKind::AmbiguousInfix => 4003,
      ErrorKind::InvalidFixity(_) => 4004,
      ErrorKind::NegativeFixity => 4005,
      ErrorKind::Unsupported(_) => 4999,
    }
  }

  /// Returns a longer explanation, for the kinds that have one.
  #[must_use]
  pub fn explain(&self) -> Option<&'static str> {
    match self.kind {
      ErrorKind::AmbiguousInfix => Some(
        "Consecutive infix operators with the same precedence must also share associativity. \
         Use parentheses to say which applies first.",
      ),
      ErrorKind::InfixWithoutOp => {
        Some("A name with an infix fixity can only be used alone when prefaced by `op`.")
      }
      _ => None,
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      ErrorKind::Expected(e) => write!(f, "expected {e}"),
      ErrorKind::InfixWithoutOp => f.write_str("infix identifier not prefaced by `op`"),
      ErrorKind::AmbiguousInfix => f.write_str("ambiguous infix expression"),
      ErrorKind::InvalidFixity(e) => write!(f, "invalid fixity: {e}"),
      ErrorKind::NegativeFixity => f.write_str("fixity is negative"),
      ErrorKind::Unsupported(s) => write!(f, "not yet implemented: {s}"),
    }
  }
}
