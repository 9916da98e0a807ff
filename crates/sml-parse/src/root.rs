//! The top level: a declaration sequence followed by the end of the tokens.

use crate::parser::{ErrorKind, Expected, Parser, Result};

pub(crate) fn root<'a>(p: &mut Parser<'a, '_>) -> Result<sml_cst::Dec<'a>> {
  let ret = crate::dec::dec(p)?;
  match p.peek() {
    None => Ok(ret),
    Some(tok) => Err(p.err_at(tok.range, ErrorKind::Expected(Expected::Dec))),
  }
}
