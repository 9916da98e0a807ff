//! Parsing tokens into a concrete syntax tree.
//!
//! Recursive descent with a cursor over the token slice. The fixity
//! environment is threaded through the parse: `infix`, `infixr`, and
//! `nonfix` declarations change it as a side effect, and `let` scopes it.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![allow(clippy::too_many_lines)]

mod dec;
mod exp;
mod fix_exp;
mod parser;
mod pat;
mod root;
mod ty;
mod util;

#[cfg(test)]
mod tests;

pub use parser::Error;

/// Parses the tokens into the declaration sequence they spell.
///
/// The tokens must already be comment-filtered. `fix_env` is updated by
/// top-level fixity declarations, so callers processing several files in
/// sequence carry fixities across them.
///
/// # Errors
///
/// On the first token that does not fit the grammar.
pub fn get<'a>(
  tokens: &[sml_cst::Token<'a>],
  fix_env: &mut sml_fixity::Env,
) -> Result<sml_cst::Dec<'a>, Error> {
  let mut p = parser::Parser::new(tokens, fix_env);
  let ret = root::root(&mut p)?;
  log::info!("successfully parsed {} out of {} tokens", p.consumed(), tokens.len());
  Ok(ret)
}
