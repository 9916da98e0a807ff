//! Reassembling right-leaning infix parses into trees that honor the fixity
//! environment.

use crate::parser::{Error, ErrorKind, Result};
use sml_cst::{Exp, Token};
use sml_fixity::Env;

/// Combines `left op right` into an `Infix` node, rebalancing against
/// `right` when it is itself infix.
///
/// The expression parser parses the right operand greedily, so `1 - 2 - 3`
/// arrives here as `(1, -, (2 - 3))`. Since `-` associates left, the tree is
/// rotated to `(1 - 2) - 3`, recursively. The right-leaning shape is kept
/// only when the inner operator binds tighter, or binds equally and both
/// operators associate right.
///
/// # Errors
///
/// When the operators bind equally but do not agree on associativity, at the
/// inner operator.
pub(crate) fn make_infix<'a>(
  env: &Env,
  left: Exp<'a>,
  op: Token<'a>,
  right: Exp<'a>,
) -> Result<Exp<'a>> {
  let (r_left, inner, r_right) = match right {
    Exp::Infix { left: r_left, op: inner, right: r_right } => (r_left, inner, r_right),
    not_infix => return Ok(infix(left, op, not_infix)),
  };
  if env.higher_precedence(inner.text, op.text)
    || (env.same_precedence(op.text, inner.text)
      && env.associates_right(op.text)
      && env.associates_right(inner.text))
  {
    let right = Exp::Infix { left: r_left, op: inner, right: r_right };
    return Ok(infix(left, op, right));
  }
  if env.higher_precedence(op.text, inner.text)
    || (env.same_precedence(op.text, inner.text)
      && env.associates_left(op.text)
      && env.associates_left(inner.text))
  {
    let new_left = make_infix(env, left, op, *r_left)?;
    return Ok(Exp::Infix { left: Box::new(new_left), op: inner, right: r_right });
  }
  Err(Error::new(inner.range, ErrorKind::AmbiguousInfix))
}

fn infix<'a>(left: Exp<'a>, op: Token<'a>, right: Exp<'a>) -> Exp<'a> {
  Exp::Infix { left: Box::new(left), op, right: Box::new(right) }
}

/// Normalizes a just-built `Raise`, `Handle`, `Andalso`, or `Orelse` node
/// whose left operand may bind looser than the node itself.
///
/// With operands parsed at the infix restriction, the one shape that needs
/// fixing is `andalso` over an `orelse` left operand: `a orelse b andalso c`
/// arrives as `andalso(orelse(a, b), c)` and leaves as
/// `orelse(a, andalso(b, c))`. The other callers see no rotation, but every
/// caller goes through here rather than assuming that.
pub(crate) fn maybe_rotate_left(exp: Exp<'_>) -> Exp<'_> {
  match exp {
    Exp::Andalso { left, andalso_kw, right } => match *left {
      Exp::Orelse { left: o_left, orelse_kw, right: o_right } => Exp::Orelse {
        left: o_left,
        orelse_kw,
        right: Box::new(Exp::Andalso { left: o_right, andalso_kw, right }),
      },
      other => Exp::Andalso { left: Box::new(other), andalso_kw, right },
    },
    other => other,
  }
}
