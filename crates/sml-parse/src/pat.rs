//! Parsing patterns.
//!
//! Only atomic patterns are supported. The non-atomic forms are recognized
//! so they can be reported as unsupported rather than mis-parsed.

use crate::parser::{ErrorKind, Expected, Parser, Result};
use crate::util::{check_no_infix, eat_name_star_eq};
use sml_cst::{Pat, Token};
use sml_token::{Reserved, TokenKind};

pub(crate) fn pat<'a>(p: &mut Parser<'a, '_>) -> Result<Pat<'a>> {
  let Some(ret) = at_pat(p)? else {
    return Err(p.err_here(ErrorKind::Expected(Expected::Pat)));
  };
  // layered, typed, infix, and constructor-application patterns. note `=`
  // is infix in expressions but never in patterns
  if let Some(tok) = p.peek() {
    if matches!(tok.kind, TokenKind::Reserved(Reserved::Colon)) {
      return Err(p.err_at(tok.range, ErrorKind::Unsupported("typed patterns")));
    }
    if matches!(tok.kind, TokenKind::Name { long: false }) && p.fix_env.contains(tok.text) {
      return Err(p.err_at(tok.range, ErrorKind::Unsupported("infix constructor patterns")));
    }
    if at_pat_start(tok) {
      return Err(p.err_at(tok.range, ErrorKind::Unsupported("non-atomic patterns")));
    }
  }
  Ok(ret)
}

/// Parses an atomic pattern, or returns `None` without consuming anything if
/// the cursor is not at one.
pub(crate) fn at_pat<'a>(p: &mut Parser<'a, '_>) -> Result<Option<Pat<'a>>> {
  let Some(tok) = p.peek() else { return Ok(None) };
  let ret = match tok.kind {
    TokenKind::Reserved(Reserved::Underscore) => Pat::Wild(p.bump()),
    _ if tok.is_constant() => Pat::Const(p.bump()),
    TokenKind::Reserved(Reserved::Op) => {
      let op_kw = Some(p.bump());
      Pat::Ident { op_kw, name: eat_name_star_eq(p)? }
    }
    TokenKind::Name { .. } => {
      check_no_infix(p, tok)?;
      Pat::Ident { op_kw: None, name: p.bump() }
    }
    TokenKind::Reserved(Reserved::LRound) => l_round_pat(p)?,
    TokenKind::Reserved(Reserved::LSquare) => {
      let lsquare = p.bump();
      let mut elems = Vec::<Pat<'a>>::new();
      let mut commas = Vec::<Token<'a>>::new();
      if !p.at(Reserved::RSquare) {
        elems.push(pat(p)?);
        while p.at(Reserved::Comma) {
          commas.push(p.bump());
          elems.push(pat(p)?);
        }
      }
      let rsquare = p.eat(Reserved::RSquare)?;
      Pat::List { lsquare, elems, commas, rsquare }
    }
    TokenKind::Reserved(Reserved::LCurly) => {
      return Err(p.err_at(tok.range, ErrorKind::Unsupported("record patterns")));
    }
    _ => return Ok(None),
  };
  Ok(Some(ret))
}

fn l_round_pat<'a>(p: &mut Parser<'a, '_>) -> Result<Pat<'a>> {
  let lround = p.bump();
  if p.at(Reserved::RRound) {
    return Ok(Pat::Unit { lround, rround: p.bump() });
  }
  let first = pat(p)?;
  if p.at(Reserved::Comma) {
    let mut elems = vec![first];
    let mut commas = Vec::<Token<'a>>::new();
    while p.at(Reserved::Comma) {
      commas.push(p.bump());
      elems.push(pat(p)?);
    }
    let rround = p.eat(Reserved::RRound)?;
    return Ok(Pat::Tuple { lround, elems, commas, rround });
  }
  let rround = p.eat(Reserved::RRound)?;
  Ok(Pat::Parens { lround, pat: Box::new(first), rround })
}

/// Returns whether `tok` can begin an atomic pattern.
pub(crate) fn at_pat_start(tok: Token<'_>) -> bool {
  tok.is_constant()
    || matches!(
      tok.kind,
      TokenKind::Name { .. }
        | TokenKind::Reserved(
          Reserved::Underscore
            | Reserved::Op
            | Reserved::LRound
            | Reserved::LSquare
            | Reserved::LCurly
        )
    )
}
