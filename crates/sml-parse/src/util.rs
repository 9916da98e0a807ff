//! Small parsing helpers shared across the grammar modules.

use crate::parser::{ErrorKind, Expected, Parser, Result};
use sml_cst::Token;
use sml_token::{Reserved, TokenKind};

/// Parses one or more `f`, delimited by `delim`. The returned delimiters
/// always number one fewer than the elements.
pub(crate) fn one_or_more_delimited<'a, T, F>(
  p: &mut Parser<'a, '_>,
  delim: Reserved,
  mut f: F,
) -> Result<(Vec<T>, Vec<Token<'a>>)>
where
  F: FnMut(&mut Parser<'a, '_>) -> Result<T>,
{
  let mut elems = vec![f(p)?];
  let mut delims = Vec::<Token<'a>>::new();
  while p.at(delim) {
    delims.push(p.bump());
    elems.push(f(p)?);
  }
  Ok((elems, delims))
}

/// Returns whether `tok` may act as an identifier in expression position: a
/// name, or the reserved `*` or `=` (both legal value identifiers).
pub(crate) fn name_star_eq(tok: Token<'_>) -> bool {
  tok.is_maybe_long_identifier() || matches!(tok.kind, TokenKind::Reserved(Reserved::Eq))
}

/// Eats an identifier-ish token, as after `op`.
pub(crate) fn eat_name_star_eq<'a>(p: &mut Parser<'a, '_>) -> Result<Token<'a>> {
  match p.peek() {
    Some(tok) if name_star_eq(tok) => Ok(p.bump()),
    _ => Err(p.err_here(ErrorKind::Expected(Expected::Name))),
  }
}

/// Checks the `op` discipline for a bare identifier about to be used as an
/// atomic expression or pattern: if it is currently infix, it must have been
/// prefaced by `op`.
pub(crate) fn check_no_infix(p: &Parser<'_, '_>, tok: Token<'_>) -> Result<()> {
  let long = matches!(tok.kind, TokenKind::Name { long: true });
  if !long && p.fix_env.contains(tok.text) {
    return Err(p.err_at(tok.range, ErrorKind::InfixWithoutOp));
  }
  Ok(())
}

/// Returns the infix operator token at the cursor, if the cursor is at a
/// non-long identifier that is infix in the current environment.
pub(crate) fn peek_infix_op<'a>(p: &Parser<'a, '_>) -> Option<Token<'a>> {
  let tok = p.peek()?;
  if matches!(tok.kind, TokenKind::Name { long: true }) {
    return None;
  }
  (name_star_eq(tok) && p.fix_env.contains(tok.text)).then_some(tok)
}
