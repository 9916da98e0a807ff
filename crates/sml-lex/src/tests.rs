use crate::{get, Token};
use pretty_assertions::assert_eq;
use sml_token::{IntBase, Reserved, TokenKind};
use source_file::SourceFile;

fn file(s: &str) -> SourceFile {
  SourceFile::new("test.sml".into(), s.to_owned())
}

fn kinds(s: &str) -> Vec<(TokenKind, String)> {
  let f = file(s);
  get(&f)
    .expect("should lex")
    .into_iter()
    .map(|tok| (tok.kind, tok.text.to_owned()))
    .collect()
}

fn err(s: &str) -> crate::Error {
  let f = file(s);
  get(&f).expect_err("should fail to lex")
}

fn name(long: bool) -> TokenKind {
  TokenKind::Name { long }
}

#[test]
fn keywords_and_names() {
  assert_eq!(
    kinds("val valx = fnord"),
    vec![
      (TokenKind::Reserved(Reserved::Val), "val".to_owned()),
      (name(false), "valx".to_owned()),
      (TokenKind::Reserved(Reserved::Eq), "=".to_owned()),
      (name(false), "fnord".to_owned()),
    ]
  );
}

#[test]
fn symbolic() {
  assert_eq!(
    kinds("x := !y ==> z"),
    vec![
      (name(false), "x".to_owned()),
      (name(false), ":=".to_owned()),
      (name(false), "!".to_owned()),
      (name(false), "y".to_owned()),
      (name(false), "==>".to_owned()),
      (name(false), "z".to_owned()),
    ]
  );
}

#[test]
fn long_identifiers() {
  assert_eq!(
    kinds("A.B.c Int.+ x"),
    vec![
      (name(true), "A.B.c".to_owned()),
      (name(true), "Int.+".to_owned()),
      (name(false), "x".to_owned()),
    ]
  );
}

#[test]
fn ty_vars() {
  assert_eq!(
    kinds("'a ''eq"),
    vec![(TokenKind::TyVar, "'a".to_owned()), (TokenKind::TyVar, "''eq".to_owned())]
  );
  assert_eq!(err("' oops").to_string(), "incomplete type variable");
}

#[test]
fn numbers() {
  assert_eq!(
    kinds("3 ~3 0x1f 0w5 0wxff 3.14 1e7 2.5e~2"),
    vec![
      (TokenKind::IntLit(IntBase::Dec), "3".to_owned()),
      (TokenKind::IntLit(IntBase::Dec), "~3".to_owned()),
      (TokenKind::IntLit(IntBase::Hex), "0x1f".to_owned()),
      (TokenKind::WordLit(IntBase::Dec), "0w5".to_owned()),
      (TokenKind::WordLit(IntBase::Hex), "0wxff".to_owned()),
      (TokenKind::RealLit, "3.14".to_owned()),
      (TokenKind::RealLit, "1e7".to_owned()),
      (TokenKind::RealLit, "2.5e~2".to_owned()),
    ]
  );
}

#[test]
fn number_errors() {
  assert_eq!(err("0x").to_string(), "missing digits in number constant");
  assert_eq!(err("~0w3").to_string(), "negative word constant");
  assert_eq!(err("3way").to_string(), "invalid character directly after number constant");
}

#[test]
fn nested_comment_is_one_token() {
  let s = "(* nested (* comment *) still comment *)";
  assert_eq!(kinds(s), vec![(TokenKind::BlockComment, s.to_owned())]);
}

#[test]
fn unclosed_comment() {
  assert_eq!(err("val (* oops").to_string(), "unclosed comment");
}

#[test]
fn string_is_one_token() {
  // 7 bytes, quotes included
  assert_eq!(kinds(r#""a\nb""#), vec![(TokenKind::StringLit, r#""a\nb""#.to_owned())]);
}

#[test]
fn char_lit() {
  assert_eq!(kinds(r##"#"x""##), vec![(TokenKind::CharLit, r##"#"x""##.to_owned())]);
  assert_eq!(err(r##"#"xy""##).to_string(), "character constant must have length 1");
}

#[test]
fn punctuation_and_symbolic_reserved() {
  assert_eq!(
    kinds("( ) [ ] , ; | _ = => -> : *"),
    vec![
      (TokenKind::Reserved(Reserved::LRound), "(".to_owned()),
      (TokenKind::Reserved(Reserved::RRound), ")".to_owned()),
      (TokenKind::Reserved(Reserved::LSquare), "[".to_owned()),
      (TokenKind::Reserved(Reserved::RSquare), "]".to_owned()),
      (TokenKind::Reserved(Reserved::Comma), ",".to_owned()),
      (TokenKind::Reserved(Reserved::Semicolon), ";".to_owned()),
      (TokenKind::Reserved(Reserved::Bar), "|".to_owned()),
      (TokenKind::Reserved(Reserved::Underscore), "_".to_owned()),
      (TokenKind::Reserved(Reserved::Eq), "=".to_owned()),
      (TokenKind::Reserved(Reserved::EqGt), "=>".to_owned()),
      (TokenKind::Reserved(Reserved::MinusGt), "->".to_owned()),
      (TokenKind::Reserved(Reserved::Colon), ":".to_owned()),
      (TokenKind::Reserved(Reserved::Star), "*".to_owned()),
    ]
  );
}

/// concatenating every token's text with the inter-token gaps restored
/// reproduces the input byte-for-byte.
#[test]
fn round_trip() {
  let s = r#"
(* a comment (* nested *) *)
val x = 1 + 2 * 3
fun f y = case y of nil => "s\^A" | _ => #"c"
val 'a id = fn z => z : 'a
"#;
  let f = file(s);
  let tokens = get(&f).expect("should lex");
  let mut rebuilt = String::new();
  let mut prev = 0usize;
  for tok in &tokens {
    rebuilt.push_str(&s[prev..usize::from(tok.range.start())]);
    rebuilt.push_str(tok.text);
    prev = usize::from(tok.range.end());
  }
  rebuilt.push_str(&s[prev..]);
  assert_eq!(rebuilt, s);
}

#[test]
fn reserved_closure() {
  let s = "val fun type infix infixr nonfix rec and op let in end case of fn raise handle \
           andalso orelse if then else while do";
  for (kind, text) in kinds(s) {
    match kind {
      TokenKind::Reserved(r) => assert_eq!(r.as_str(), text),
      k => panic!("not reserved: {k:?} {text}"),
    }
  }
}

#[test]
fn next_token() {
  let f = file("  val x");
  let tok: Token<'_> = crate::next(&f, 0.into()).expect("should lex").expect("should be present");
  assert_eq!(tok.kind, TokenKind::Reserved(Reserved::Val));
  let tok = crate::next(&f, tok.range.end()).expect("should lex").expect("should be present");
  assert_eq!(tok.text, "x");
  assert!(crate::next(&f, tok.range.end()).expect("should lex").is_none());
}
