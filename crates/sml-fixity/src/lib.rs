//! Infix operator names: precedence, associativity, and the dictionary the
//! parser threads through declarations.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// The default infix operators in the std basis.
static STD_BASIS: Lazy<Env> = Lazy::new(|| {
  let ops_arr: [(Infix, &[&str]); 6] = [
    (Infix::left(7), &["*", "/", "div", "mod"]),
    (Infix::left(6), &["+", "-", "^"]),
    (Infix::right(5), &["::", "@"]),
    (Infix::left(4), &["=", "<>", ">", ">=", "<", "<="]),
    (Infix::left(3), &[":=", "o"]),
    (Infix::left(0), &["before"]),
  ];
  let mut ret = Env::default();
  for (info, names) in ops_arr {
    for &name in names {
      ret.insert(name, info);
    }
  }
  ret
});

/// Information about an infix name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Infix {
  /// The precedence.
  pub prec: u16,
  /// The associativity.
  pub assoc: Assoc,
}

impl Infix {
  /// Returns a new `Infix` with left associativity.
  #[must_use]
  pub fn left(prec: u16) -> Self {
    Self { prec, assoc: Assoc::Left }
  }

  /// Returns a new `Infix` with right associativity.
  #[must_use]
  pub fn right(prec: u16) -> Self {
    Self { prec, assoc: Assoc::Right }
  }
}

/// Associativity for infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
  /// `infix`
  Left,
  /// `infixr`
  Right,
}

/// A mapping from names to fixities.
///
/// Cheap to clone, which is how the parser scopes `infix` declarations
/// inside `let`: clone on entry, restore on exit.
#[derive(Debug, Clone, Default)]
pub struct Env(FxHashMap<SmolStr, Infix>);

impl Env {
  /// Returns the dictionary preloaded with the std basis operators.
  #[must_use]
  pub fn std_basis() -> Self {
    STD_BASIS.clone()
  }

  /// Inserts `name` with `info`, replacing any previous entry.
  pub fn insert(&mut self, name: &str, info: Infix) {
    self.0.insert(SmolStr::new(name), info);
  }

  /// Removes `name`. Does nothing if absent.
  pub fn remove(&mut self, name: &str) {
    self.0.remove(name);
  }

  /// Returns whether `name` is currently infix.
  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
  }

  /// Returns the fixity of `name`, if it is currently infix.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<Infix> {
    self.0.get(name).copied()
  }

  /// The fixity used for comparisons: absent names get the minimum
  /// precedence and left associativity.
  fn resolve(&self, name: &str) -> Infix {
    self.get(name).unwrap_or(Infix::left(0))
  }

  /// Returns whether `a` binds strictly tighter than `b`.
  #[must_use]
  pub fn higher_precedence(&self, a: &str, b: &str) -> bool {
    self.resolve(a).prec > self.resolve(b).prec
  }

  /// Returns whether `a` and `b` bind equally tightly.
  #[must_use]
  pub fn same_precedence(&self, a: &str, b: &str) -> bool {
    self.resolve(a).prec == self.resolve(b).prec
  }

  /// Returns whether `name` associates to the left.
  #[must_use]
  pub fn associates_left(&self, name: &str) -> bool {
    self.resolve(name).assoc == Assoc::Left
  }

  /// Returns whether `name` associates to the right.
  #[must_use]
  pub fn associates_right(&self, name: &str) -> bool {
    self.resolve(name).assoc == Assoc::Right
  }
}

#[cfg(test)]
mod tests {
  use crate::{Assoc, Env, Infix};

  #[test]
  fn std_basis() {
    let env = Env::std_basis();
    assert!(env.higher_precedence("*", "+"));
    assert!(env.higher_precedence("+", "::"));
    assert!(env.same_precedence("div", "mod"));
    assert!(env.associates_left("-"));
    assert!(env.associates_right("::"));
    assert!(env.contains("before"));
    assert!(!env.contains("++"));
  }

  #[test]
  fn insert_replaces() {
    let mut env = Env::std_basis();
    env.insert("@@", Infix::left(5));
    env.insert("@@", Infix::right(5));
    assert_eq!(env.get("@@"), Some(Infix { prec: 5, assoc: Assoc::Right }));
    env.remove("@@");
    assert!(!env.contains("@@"));
    env.remove("@@");
  }
}
