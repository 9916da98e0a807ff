//! Parsing type expressions.

use crate::parser::{ErrorKind, Expected, Parser, Result};
use crate::util::one_or_more_delimited;
use sml_cst::{SyntaxSeq, Token, Ty};
use sml_token::{Reserved, TokenKind};

pub(crate) fn ty<'a>(p: &mut Parser<'a, '_>) -> Result<Ty<'a>> {
  ty_prec(p, TyPrec::Arrow)
}

fn ty_prec<'a>(p: &mut Parser<'a, '_>, min_prec: TyPrec) -> Result<Ty<'a>> {
  let Some(tok) = p.peek() else {
    return Err(p.err_here(ErrorKind::Expected(Expected::Ty)));
  };
  let mut cur = match tok.kind {
    TokenKind::TyVar => Ty::Var(p.bump()),
    TokenKind::Name { .. } if tok.is_maybe_long_tycon() => {
      Ty::Con { args: Box::new(SyntaxSeq::Empty), tycon: p.bump() }
    }
    TokenKind::Reserved(Reserved::LRound) => {
      let lround = p.bump();
      let first = ty(p)?;
      if p.at(Reserved::Comma) {
        // `( ty , ... ) longtycon`
        let mut elems = vec![first];
        let mut delims = Vec::<Token<'a>>::new();
        while p.at(Reserved::Comma) {
          delims.push(p.bump());
          elems.push(ty(p)?);
        }
        let right = p.eat(Reserved::RRound)?;
        let args = Box::new(SyntaxSeq::Many { left: lround, elems, delims, right });
        Ty::Con { args, tycon: eat_tycon(p)? }
      } else {
        let rround = p.eat(Reserved::RRound)?;
        Ty::Parens { lround, ty: Box::new(first), rround }
      }
    }
    _ => return Err(p.err_here(ErrorKind::Expected(Expected::Ty))),
  };
  while let Some(tok) = p.peek() {
    cur = match tok.kind {
      TokenKind::Reserved(Reserved::MinusGt) => {
        if TyPrec::Arrow < min_prec {
          break;
        }
        let arrow = p.bump();
        // right-associative
        let res = ty_prec(p, TyPrec::Arrow)?;
        Ty::Arrow { param: Box::new(cur), arrow, res: Box::new(res) }
      }
      TokenKind::Reserved(Reserved::Star) => {
        if TyPrec::Star < min_prec {
          break;
        }
        let mut elems = vec![cur];
        let mut stars = Vec::<Token<'a>>::new();
        while p.at(Reserved::Star) {
          stars.push(p.bump());
          elems.push(ty_prec(p, TyPrec::App)?);
        }
        Ty::Tuple { elems, stars }
      }
      TokenKind::Name { .. } if tok.is_maybe_long_tycon() => {
        Ty::Con { args: Box::new(SyntaxSeq::One(cur)), tycon: p.bump() }
      }
      _ => break,
    };
  }
  Ok(cur)
}

fn eat_tycon<'a>(p: &mut Parser<'a, '_>) -> Result<Token<'a>> {
  match p.peek() {
    Some(tok) if tok.is_maybe_long_tycon() => Ok(p.bump()),
    _ => Err(p.err_here(ErrorKind::Expected(Expected::TyCon))),
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TyPrec {
  Arrow,
  Star,
  App,
}

/// The `tyvarseq` before a binding's name: nothing, `'a`, or `('a, 'b)`.
pub(crate) fn ty_var_seq<'a>(p: &mut Parser<'a, '_>) -> Result<SyntaxSeq<'a, Token<'a>>> {
  if p.peek().is_some_and(|tok| tok.is_tyvar()) {
    return Ok(SyntaxSeq::One(p.bump()));
  }
  if p.at(Reserved::LRound) && p.peek_n(1).is_some_and(|tok| tok.is_tyvar()) {
    let left = p.bump();
    let (elems, delims) = one_or_more_delimited(p, Reserved::Comma, |p| match p.peek() {
      Some(tok) if tok.is_tyvar() => Ok(p.bump()),
      _ => Err(p.err_here(ErrorKind::Expected(Expected::TyVar))),
    })?;
    let right = p.eat(Reserved::RRound)?;
    return Ok(SyntaxSeq::Many { left, elems, delims, right });
  }
  Ok(SyntaxSeq::Empty)
}
