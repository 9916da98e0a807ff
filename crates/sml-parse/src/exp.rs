//! Parsing expressions.

use crate::fix_exp::{make_infix, maybe_rotate_left};
use crate::parser::{ErrorKind, Expected, Parser, Result};
use crate::pat;
use crate::ty::ty;
use crate::util::{check_no_infix, eat_name_star_eq, name_star_eq, one_or_more_delimited, peek_infix_op};
use sml_cst::{Arm, Exp, Match, Token};
use sml_token::{Reserved, TokenKind};

/// The grammar layers expressions as `AtExp < AppExp < InfExp < Exp`. The
/// lower two layers are `at_exp` and the application fallback in the
/// after-expression loop; this restriction distinguishes the upper two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Restriction {
  /// An infix operand: stop before `:`, `andalso`, `orelse`, `handle`, and
  /// the prefix forms that swallow a whole expression.
  Inf,
  /// No restriction.
  Any,
}

impl Restriction {
  fn any_okay(self) -> bool {
    matches!(self, Restriction::Any)
  }
}

pub(crate) fn exp<'a>(p: &mut Parser<'a, '_>, r: Restriction) -> Result<Exp<'a>> {
  let Some(tok) = p.peek() else {
    return Err(p.err_here(ErrorKind::Expected(Expected::Exp)));
  };
  if r.any_okay() {
    match tok.kind {
      TokenKind::Reserved(Reserved::Raise) => {
        let raise_kw = p.bump();
        let body = exp(p, Restriction::Any)?;
        return Ok(maybe_rotate_left(Exp::Raise { raise_kw, exp: Box::new(body) }));
      }
      TokenKind::Reserved(Reserved::If) => {
        let if_kw = p.bump();
        let cond = exp(p, Restriction::Any)?;
        let then_kw = p.eat(Reserved::Then)?;
        let then_exp = exp(p, Restriction::Any)?;
        let else_kw = p.eat(Reserved::Else)?;
        let else_exp = exp(p, Restriction::Any)?;
        return Ok(Exp::IfThenElse {
          if_kw,
          cond: Box::new(cond),
          then_kw,
          then_exp: Box::new(then_exp),
          else_kw,
          else_exp: Box::new(else_exp),
        });
      }
      TokenKind::Reserved(Reserved::While) => {
        let while_kw = p.bump();
        let cond = exp(p, Restriction::Any)?;
        let do_kw = p.eat(Reserved::Do)?;
        let body = exp(p, Restriction::Any)?;
        return Ok(Exp::WhileDo { while_kw, cond: Box::new(cond), do_kw, body: Box::new(body) });
      }
      TokenKind::Reserved(Reserved::Case) => {
        let case_kw = p.bump();
        let head = exp(p, Restriction::Any)?;
        let of_kw = p.eat(Reserved::Of)?;
        let matcher = matcher(p)?;
        return Ok(Exp::Case { case_kw, exp: Box::new(head), of_kw, matcher });
      }
      TokenKind::Reserved(Reserved::Fn) => {
        let fn_kw = p.bump();
        let matcher = matcher(p)?;
        return Ok(Exp::Fn { fn_kw, matcher });
      }
      _ => {}
    }
  }
  let Some(mut cur) = at_exp(p)? else {
    return Err(p.err_here(ErrorKind::Expected(Expected::Exp)));
  };
  loop {
    let Some(tok) = p.peek() else { break };
    if tok.ends_current_exp() {
      break;
    }
    // an infix operator is a continuation at every restriction; its operand
    // is parsed greedily and the tree rebalanced afterwards
    if let Some(op) = peek_infix_op(p) {
      p.bump();
      let right = exp(p, Restriction::Inf)?;
      cur = make_infix(p.fix_env, cur, op, right)?;
      continue;
    }
    match tok.kind {
      TokenKind::Reserved(Reserved::Colon) if r.any_okay() => {
        let colon = p.bump();
        let annot = ty(p)?;
        cur = Exp::Typed { exp: Box::new(cur), colon, ty: annot };
      }
      TokenKind::Reserved(Reserved::Andalso) if r.any_okay() => {
        let andalso_kw = p.bump();
        let right = exp(p, Restriction::Inf)?;
        cur = maybe_rotate_left(Exp::Andalso {
          left: Box::new(cur),
          andalso_kw,
          right: Box::new(right),
        });
      }
      TokenKind::Reserved(Reserved::Orelse) if r.any_okay() => {
        let orelse_kw = p.bump();
        let right = exp(p, Restriction::Inf)?;
        cur = maybe_rotate_left(Exp::Orelse {
          left: Box::new(cur),
          orelse_kw,
          right: Box::new(right),
        });
      }
      TokenKind::Reserved(Reserved::Handle) if r.any_okay() => {
        let handle_kw = p.bump();
        let matcher = matcher(p)?;
        cur = maybe_rotate_left(Exp::Handle { exp: Box::new(cur), handle_kw, matcher });
      }
      // application is the fallback, tried when nothing else continues
      _ if at_exp_start(tok) => {
        let arg = at_exp(p)?.expect("at_exp_start implies an atomic expression");
        cur = Exp::App { func: Box::new(cur), arg: Box::new(arg) };
      }
      _ => break,
    }
  }
  Ok(cur)
}

/// Parses an atomic expression, or returns `None` without consuming
/// anything if the cursor is not at one.
fn at_exp<'a>(p: &mut Parser<'a, '_>) -> Result<Option<Exp<'a>>> {
  let Some(tok) = p.peek() else { return Ok(None) };
  let ret = match tok.kind {
    _ if tok.is_constant() => Exp::Const(p.bump()),
    TokenKind::Reserved(Reserved::Op) => {
      let op_kw = Some(p.bump());
      Exp::Ident { op_kw, name: eat_name_star_eq(p)? }
    }
    _ if name_star_eq(tok) => {
      check_no_infix(p, tok)?;
      Exp::Ident { op_kw: None, name: p.bump() }
    }
    TokenKind::Reserved(Reserved::LRound) => l_round_exp(p)?,
    TokenKind::Reserved(Reserved::LSquare) => {
      let lsquare = p.bump();
      let mut elems = Vec::<Exp<'a>>::new();
      let mut commas = Vec::<Token<'a>>::new();
      if !p.at(Reserved::RSquare) {
        elems.push(exp(p, Restriction::Any)?);
        while p.at(Reserved::Comma) {
          commas.push(p.bump());
          elems.push(exp(p, Restriction::Any)?);
        }
      }
      let rsquare = p.eat(Reserved::RSquare)?;
      Exp::List { lsquare, elems, commas, rsquare }
    }
    TokenKind::Reserved(Reserved::Let) => let_exp(p)?,
    TokenKind::Reserved(Reserved::LCurly) => {
      return Err(p.err_at(tok.range, ErrorKind::Unsupported("record expressions")));
    }
    _ => return Ok(None),
  };
  Ok(Some(ret))
}

/// Just bumped a `(`. Either `()`, a parenthesized expression, a tuple, or
/// a sequence.
fn l_round_exp<'a>(p: &mut Parser<'a, '_>) -> Result<Exp<'a>> {
  let lround = p.bump();
  if p.at(Reserved::RRound) {
    return Ok(Exp::Unit { lround, rround: p.bump() });
  }
  let first = exp(p, Restriction::Any)?;
  if p.at(Reserved::Comma) {
    let mut elems = vec![first];
    let mut commas = Vec::<Token<'a>>::new();
    while p.at(Reserved::Comma) {
      commas.push(p.bump());
      elems.push(exp(p, Restriction::Any)?);
    }
    let rround = p.eat(Reserved::RRound)?;
    return Ok(Exp::Tuple { lround, elems, commas, rround });
  }
  if p.at(Reserved::Semicolon) {
    let mut elems = vec![first];
    let mut semicolons = Vec::<Token<'a>>::new();
    while p.at(Reserved::Semicolon) {
      semicolons.push(p.bump());
      elems.push(exp(p, Restriction::Any)?);
    }
    let rround = p.eat(Reserved::RRound)?;
    return Ok(Exp::Sequence { lround, elems, semicolons, rround });
  }
  if p.at(Reserved::RRound) {
    return Ok(Exp::Parens { lround, exp: Box::new(first), rround: p.bump() });
  }
  Err(p.err_here(ErrorKind::Expected(Expected::LRoundExpTail)))
}

fn let_exp<'a>(p: &mut Parser<'a, '_>) -> Result<Exp<'a>> {
  let let_kw = p.bump();
  // fixity declared inside the let is scoped to it
  let saved = p.fix_env.clone();
  let inner_dec = crate::dec::dec(p)?;
  let in_kw = p.eat(Reserved::In)?;
  let (exps, semicolons) = one_or_more_delimited(p, Reserved::Semicolon, |p| {
    exp(p, Restriction::Any)
  })?;
  let end_kw = p.eat(Reserved::End)?;
  *p.fix_env = saved;
  Ok(Exp::LetInEnd { let_kw, dec: Box::new(inner_dec), in_kw, exps, semicolons, end_kw })
}

/// One or more `pat => exp` arms separated by `|`.
fn matcher<'a>(p: &mut Parser<'a, '_>) -> Result<Match<'a>> {
  let (arms, bars) = one_or_more_delimited(p, Reserved::Bar, |p| {
    let head = pat::pat(p)?;
    let arrow = p.eat(Reserved::EqGt)?;
    let body = exp(p, Restriction::Any)?;
    Ok(Arm { pat: head, arrow, exp: body })
  })?;
  Ok(Match { arms, bars })
}

/// Returns whether `tok` can begin an atomic expression.
fn at_exp_start(tok: Token<'_>) -> bool {
  tok.is_constant()
    || name_star_eq(tok)
    || matches!(
      tok.kind,
      TokenKind::Reserved(
        Reserved::Op | Reserved::LRound | Reserved::LSquare | Reserved::LCurly | Reserved::Let
      )
    )
}
