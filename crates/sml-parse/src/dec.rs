//! Parsing declarations.
//!
//! Fixity declarations update the parser's environment as a side effect, so
//! they take hold for the declarations and expressions after them.

use crate::exp::{exp, Restriction};
use crate::parser::{ErrorKind, Expected, Parser, Result};
use crate::pat::{at_pat, pat};
use crate::ty::{ty, ty_var_seq};
use crate::util::name_star_eq;
use sml_cst::{Dec, Pat, Token, TyAnnotation};
use sml_token::{Reserved, TokenKind};

/// Zero or more declarations with optional `;` between them.
pub(crate) fn dec<'a>(p: &mut Parser<'a, '_>) -> Result<Dec<'a>> {
  let mut elems = Vec::<Dec<'a>>::new();
  let mut delims = Vec::<Option<Token<'a>>>::new();
  loop {
    elems.push(dec_one(p)?);
    if p.at(Reserved::Semicolon) {
      delims.push(Some(p.bump()));
      continue;
    }
    if p.peek().is_some_and(starts_dec) {
      delims.push(None);
      continue;
    }
    break;
  }
  let ret = if elems.len() == 1 {
    elems.pop().expect("just checked the length")
  } else {
    Dec::Multiple { elems, delims }
  };
  Ok(ret)
}

fn starts_dec(tok: Token<'_>) -> bool {
  matches!(
    tok.kind,
    TokenKind::Reserved(
      Reserved::Val
        | Reserved::Fun
        | Reserved::Type
        | Reserved::Infix
        | Reserved::Infixr
        | Reserved::Nonfix
    )
  )
}

/// One declaration, or `Empty` if the cursor does not start one.
fn dec_one<'a>(p: &mut Parser<'a, '_>) -> Result<Dec<'a>> {
  let Some(tok) = p.peek() else { return Ok(Dec::Empty) };
  let ret = match tok.kind {
    TokenKind::Reserved(Reserved::Val) => {
      let val_kw = p.bump();
      dec_val(p, val_kw)?
    }
    TokenKind::Reserved(Reserved::Fun) => {
      let fun_kw = p.bump();
      dec_fun(p, fun_kw)?
    }
    TokenKind::Reserved(Reserved::Type) => {
      let type_kw = p.bump();
      dec_type(p, type_kw)?
    }
    TokenKind::Reserved(Reserved::Infix) => {
      let infix_kw = p.bump();
      let (prec, n) = fixity_prec(p)?;
      let names = fixity_names(p)?;
      for name in &names {
        p.fix_env.insert(name.text, sml_fixity::Infix::left(n));
      }
      Dec::Infix { infix_kw, prec, names }
    }
    TokenKind::Reserved(Reserved::Infixr) => {
      let infixr_kw = p.bump();
      let (prec, n) = fixity_prec(p)?;
      let names = fixity_names(p)?;
      for name in &names {
        p.fix_env.insert(name.text, sml_fixity::Infix::right(n));
      }
      Dec::Infixr { infixr_kw, prec, names }
    }
    TokenKind::Reserved(Reserved::Nonfix) => {
      let nonfix_kw = p.bump();
      let names = fixity_names(p)?;
      for name in &names {
        p.fix_env.remove(name.text);
      }
      Dec::Nonfix { nonfix_kw, names }
    }
    _ => return Ok(Dec::Empty),
  };
  // single bindings only
  if p.at(Reserved::And) {
    return Err(p.err_here(ErrorKind::Unsupported("`and` declaration chains")));
  }
  Ok(ret)
}

fn dec_val<'a>(p: &mut Parser<'a, '_>, val_kw: Token<'a>) -> Result<Dec<'a>> {
  let tyvars = ty_var_seq(p)?;
  let rec_kw = p.at(Reserved::Rec).then(|| p.bump());
  let head = pat(p)?;
  let eq = p.eat(Reserved::Eq)?;
  let body = exp(p, Restriction::Any)?;
  Ok(Dec::Val { val_kw, tyvars, rec_kw, pat: head, eq, exp: body })
}

fn dec_fun<'a>(p: &mut Parser<'a, '_>, fun_kw: Token<'a>) -> Result<Dec<'a>> {
  let tyvars = ty_var_seq(p)?;
  let op_kw = p.at(Reserved::Op).then(|| p.bump());
  let name = match p.peek() {
    Some(tok) if tok.is_value_identifier() => {
      if op_kw.is_none() && p.fix_env.contains(tok.text) {
        return Err(p.err_at(tok.range, ErrorKind::InfixWithoutOp));
      }
      p.bump()
    }
    _ => return Err(p.err_here(ErrorKind::Expected(Expected::Name))),
  };
  let mut args = Vec::<Pat<'a>>::new();
  while let Some(arg) = at_pat(p)? {
    args.push(arg);
  }
  if args.is_empty() {
    return Err(p.err_here(ErrorKind::Expected(Expected::Pat)));
  }
  let ret_ty = if p.at(Reserved::Colon) {
    let colon = p.bump();
    Some(TyAnnotation { colon, ty: ty(p)? })
  } else {
    None
  };
  let eq = p.eat(Reserved::Eq)?;
  let body = exp(p, Restriction::Any)?;
  if p.at(Reserved::Bar) {
    return Err(p.err_here(ErrorKind::Unsupported("multiple `fun` clauses")));
  }
  Ok(Dec::Fun { fun_kw, tyvars, op_kw, name, args, ret_ty, eq, body })
}

fn dec_type<'a>(p: &mut Parser<'a, '_>, type_kw: Token<'a>) -> Result<Dec<'a>> {
  let tyvars = ty_var_seq(p)?;
  let tycon = match p.peek() {
    Some(tok) if matches!(tok.kind, TokenKind::Name { long: false }) && tok.is_maybe_long_tycon() => {
      p.bump()
    }
    _ => return Err(p.err_here(ErrorKind::Expected(Expected::TyCon))),
  };
  let eq = p.eat(Reserved::Eq)?;
  let body = ty(p)?;
  Ok(Dec::Type { type_kw, tyvars, tycon, eq, ty: body })
}

/// The optional decimal precedence after `infix` and `infixr`. Absent means
/// zero.
fn fixity_prec<'a>(p: &mut Parser<'a, '_>) -> Result<(Option<Token<'a>>, u16)> {
  if !p.peek().is_some_and(|tok| matches!(tok.kind, TokenKind::IntLit(_))) {
    return Ok((None, 0));
  }
  let tok = p.bump();
  if tok.text.starts_with('~') {
    return Err(p.err_at(tok.range, ErrorKind::NegativeFixity));
  }
  let n = tok.text.parse::<u16>().map_err(|e| p.err_at(tok.range, ErrorKind::InvalidFixity(e)))?;
  Ok((Some(tok), n))
}

/// One or more plain names, `*` and `=` included.
fn fixity_names<'a>(p: &mut Parser<'a, '_>) -> Result<Vec<Token<'a>>> {
  let mut names = Vec::<Token<'a>>::new();
  while p
    .peek()
    .is_some_and(|tok| name_star_eq(tok) && !matches!(tok.kind, TokenKind::Name { long: true }))
  {
    names.push(p.bump());
  }
  if names.is_empty() {
    return Err(p.err_here(ErrorKind::Expected(Expected::Name)));
  }
  Ok(names)
}
