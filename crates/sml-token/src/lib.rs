//! The token model: the generic token shape both lexers share, and the
//! specific kinds for the main language.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

use std::fmt;
use text_size::TextRange;

/// A token: a kind together with the source slice it came from.
///
/// The text and range always agree; the range is absolute within the file the
/// token was lexed from, so the original input is recoverable by
/// concatenating token texts and the gaps between their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a, K> {
  /// The kind.
  pub kind: K,
  /// The source text.
  pub text: &'a str,
  /// The absolute byte range of `text`.
  pub range: TextRange,
}

/// A kind of token in the main language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A reserved word or punctuation.
  Reserved(Reserved),
  /// An alphanumeric or symbolic identifier. `long` iff the text contains
  /// `.` separators, as in `A.B.c`.
  Name {
    /// Whether this is a long (dotted) identifier.
    long: bool,
  },
  /// A type variable, like `'a`.
  TyVar,
  /// An integer constant.
  IntLit(IntBase),
  /// A word constant, like `0w5`.
  WordLit(IntBase),
  /// A real constant.
  RealLit,
  /// A character constant, like `#"c"`.
  CharLit,
  /// A string constant.
  StringLit,
  /// A block comment, possibly nested, as one token.
  BlockComment,
}

/// The base an integer or word constant is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntBase {
  /// Decimal.
  Dec,
  /// Hexadecimal, with a `0x` or `0wx` prefix.
  Hex,
}

/// The closed set of reserved forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Reserved {
  Val,
  Fun,
  Type,
  Infix,
  Infixr,
  Nonfix,
  Rec,
  And,
  Op,
  Let,
  In,
  End,
  Case,
  Of,
  Fn,
  Raise,
  Handle,
  Andalso,
  Orelse,
  If,
  Then,
  Else,
  While,
  Do,
  LRound,
  RRound,
  LSquare,
  RSquare,
  LCurly,
  RCurly,
  Comma,
  Semicolon,
  Bar,
  Underscore,
  Eq,
  EqGt,
  MinusGt,
  Colon,
  Star,
}

impl Reserved {
  /// Returns the textual form.
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      Reserved::Val => "val",
      Reserved::Fun => "fun",
      Reserved::Type => "type",
      Reserved::Infix => "infix",
      Reserved::Infixr => "infixr",
      Reserved::Nonfix => "nonfix",
      Reserved::Rec => "rec",
      Reserved::And => "and",
      Reserved::Op => "op",
      Reserved::Let => "let",
      Reserved::In => "in",
      Reserved::End => "end",
      Reserved::Case => "case",
      Reserved::Of => "of",
      Reserved::Fn => "fn",
      Reserved::Raise => "raise",
      Reserved::Handle => "handle",
      Reserved::Andalso => "andalso",
      Reserved::Orelse => "orelse",
      Reserved::If => "if",
      Reserved::Then => "then",
      Reserved::Else => "else",
      Reserved::While => "while",
      Reserved::Do => "do",
      Reserved::LRound => "(",
      Reserved::RRound => ")",
      Reserved::LSquare => "[",
      Reserved::RSquare => "]",
      Reserved::LCurly => "{",
      Reserved::RCurly => "}",
      Reserved::Comma => ",",
      Reserved::Semicolon => ";",
      Reserved::Bar => "|",
      Reserved::Underscore => "_",
      Reserved::Eq => "=",
      Reserved::EqGt => "=>",
      Reserved::MinusGt => "->",
      Reserved::Colon => ":",
      Reserved::Star => "*",
    }
  }

  /// Returns the reserved word whose textual form is the alphanumeric
  /// lexeme `s`, if any.
  #[must_use]
  pub fn alpha(s: &str) -> Option<Self> {
    let ret = match s {
      "val" => Reserved::Val,
      "fun" => Reserved::Fun,
      "type" => Reserved::Type,
      "infix" => Reserved::Infix,
      "infixr" => Reserved::Infixr,
      "nonfix" => Reserved::Nonfix,
      "rec" => Reserved::Rec,
      "and" => Reserved::And,
      "op" => Reserved::Op,
      "let" => Reserved::Let,
      "in" => Reserved::In,
      "end" => Reserved::End,
      "case" => Reserved::Case,
      "of" => Reserved::Of,
      "fn" => Reserved::Fn,
      "raise" => Reserved::Raise,
      "handle" => Reserved::Handle,
      "andalso" => Reserved::Andalso,
      "orelse" => Reserved::Orelse,
      "if" => Reserved::If,
      "then" => Reserved::Then,
      "else" => Reserved::Else,
      "while" => Reserved::While,
      "do" => Reserved::Do,
      _ => return None,
    };
    Some(ret)
  }

  /// Returns the reserved form whose textual form is the symbolic lexeme
  /// `s`, if any.
  #[must_use]
  pub fn symbolic(s: &str) -> Option<Self> {
    let ret = match s {
      "=" => Reserved::Eq,
      "=>" => Reserved::EqGt,
      "->" => Reserved::MinusGt,
      ":" => Reserved::Colon,
      "|" => Reserved::Bar,
      "*" => Reserved::Star,
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

/// The single-byte punctuation forms, dispatched on directly by the lexer.
pub const PUNCTUATION: [(u8, Reserved); 9] = [
  (b'(', Reserved::LRound),
  (b')', Reserved::RRound),
  (b'[', Reserved::LSquare),
  (b']', Reserved::RSquare),
  (b'{', Reserved::LCurly),
  (b'}', Reserved::RCurly),
  (b',', Reserved::Comma),
  (b';', Reserved::Semicolon),
  (b'_', Reserved::Underscore),
];

impl<'a> Token<'a, TokenKind> {
  /// Returns whether this is a comment.
  #[must_use]
  pub fn is_comment(&self) -> bool {
    matches!(self.kind, TokenKind::BlockComment)
  }

  /// Returns whether this can be a value identifier: a non-long name, or
  /// the reserved `*`.
  #[must_use]
  pub fn is_value_identifier(&self) -> bool {
    matches!(self.kind, TokenKind::Name { long: false } | TokenKind::Reserved(Reserved::Star))
  }

  /// Returns whether this can be a long value identifier.
  #[must_use]
  pub fn is_maybe_long_identifier(&self) -> bool {
    matches!(self.kind, TokenKind::Name { .. } | TokenKind::Reserved(Reserved::Star))
  }

  /// Returns whether this is a type variable.
  #[must_use]
  pub fn is_tyvar(&self) -> bool {
    matches!(self.kind, TokenKind::TyVar)
  }

  /// Returns whether this can be a (possibly long) type constructor: a name
  /// whose final dotted segment is alphanumeric.
  #[must_use]
  pub fn is_maybe_long_tycon(&self) -> bool {
    matches!(self.kind, TokenKind::Name { .. })
      && self
        .text
        .rsplit('.')
        .next()
        .and_then(|seg| seg.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
  }

  /// Returns whether this is the reserved `*`.
  #[must_use]
  pub fn is_star(&self) -> bool {
    matches!(self.kind, TokenKind::Reserved(Reserved::Star))
  }

  /// Returns whether this is a constant.
  #[must_use]
  pub fn is_constant(&self) -> bool {
    matches!(
      self.kind,
      TokenKind::IntLit(_)
        | TokenKind::WordLit(_)
        | TokenKind::RealLit
        | TokenKind::CharLit
        | TokenKind::StringLit
    )
  }

  /// Returns whether this token cannot appear in the middle of the current
  /// expression, i.e. whether seeing it should stop an expression parse.
  #[must_use]
  pub fn ends_current_exp(&self) -> bool {
    matches!(
      self.kind,
      TokenKind::Reserved(
        Reserved::RRound
          | Reserved::RSquare
          | Reserved::Comma
          | Reserved::Semicolon
          | Reserved::Bar
          | Reserved::Then
          | Reserved::Else
          | Reserved::Of
          | Reserved::Do
          | Reserved::In
          | Reserved::End
      )
    )
  }
}
