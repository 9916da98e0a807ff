use crate::{block_comment, string};
use pretty_assertions::assert_eq;

fn comment(s: &str) -> (Result<bool, ()>, usize) {
  let mut idx = 0usize;
  let res = block_comment::get(&mut idx, s.as_bytes()).map_err(|_| ());
  (res, idx)
}

#[test]
fn comment_flat() {
  assert_eq!(comment("(* hi *) there"), (Ok(true), 8));
}

#[test]
fn comment_nested() {
  let s = "(* nested (* comment *) still comment *)";
  assert_eq!(comment(s), (Ok(true), s.len()));
}

#[test]
fn comment_not_a_comment() {
  assert_eq!(comment("(x * y)"), (Ok(false), 0));
}

#[test]
fn comment_unclosed() {
  assert!(comment("(* (* oops *)").0.is_err());
}

fn str_ok(s: &str) -> (Vec<u8>, usize) {
  let mut idx = 0usize;
  let out = string::get(&mut idx, s.as_bytes()).expect("should lex the string");
  (out, idx)
}

fn str_err(s: &str) -> string::Error {
  let mut idx = 0usize;
  string::get(&mut idx, s.as_bytes()).expect_err("should fail to lex the string").1
}

#[test]
fn string_plain() {
  let (out, idx) = str_ok(r#""hello" rest"#);
  assert_eq!(out, b"hello");
  assert_eq!(idx, 7);
}

#[test]
fn string_escapes() {
  let (out, _) = str_ok(r#""a\nb\t\\\"\065""#);
  assert_eq!(out, b"a\nb\t\\\"A");
}

#[test]
fn string_control_escape() {
  let (out, _) = str_ok(r#""\^I""#);
  assert_eq!(out, b"\t");
}

#[test]
fn string_continuation() {
  let (out, _) = str_ok("\"one \\\n   \\two\"");
  assert_eq!(out, b"one two");
}

#[test]
fn string_unclosed() {
  assert_eq!(str_err("\"oops\n"), string::Error::Unclosed);
  assert_eq!(str_err("\"oops"), string::Error::Unclosed);
}

#[test]
fn string_bad_escape() {
  assert_eq!(str_err(r#""\q""#), string::Error::InvalidEscape);
  assert_eq!(str_err(r#""\256""#), string::Error::InvalidEscape);
}

#[test]
fn string_bad_continuation() {
  assert_eq!(str_err("\"a\\ x\\b\""), string::Error::NonWhitespaceInContinuation);
}
