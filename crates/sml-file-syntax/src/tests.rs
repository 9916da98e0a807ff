use crate::SourceFileSyntax;
use source_file::SourceFile;

fn file(s: &str) -> SourceFile {
  SourceFile::new("test.sml".into(), s.to_owned())
}

#[test]
fn comments_are_kept_on_the_token_stream() {
  let f = file("val x = (* forty-two *) 42");
  let mut env = sml_fixity::Env::std_basis();
  let syntax = SourceFileSyntax::new(&f, &mut env).expect("should parse");
  assert!(syntax.tokens.iter().any(sml_lex::Token::is_comment));
  assert!(matches!(syntax.parse, sml_cst::Dec::Val { .. }));
}

#[test]
fn fixity_carries_across_files() {
  let mut env = sml_fixity::Env::std_basis();
  let first = file("infixr 5 +++");
  let f1 = SourceFileSyntax::new(&first, &mut env);
  assert!(f1.is_ok());
  let second = file("val x = a +++ b +++ c");
  let f2 = SourceFileSyntax::new(&second, &mut env);
  assert!(f2.is_ok());
}

#[test]
fn rendered_diagnostic() {
  let f = file("val x =\nval y = 2");
  let mut env = sml_fixity::Env::std_basis();
  let e = SourceFileSyntax::new(&f, &mut env).expect_err("should fail to parse");
  let shown = e.show(&f);
  assert!(shown.contains("PARSE ERROR"), "{shown}");
  assert!(shown.contains("test.sml"), "{shown}");
  assert!(shown.contains("2:1"), "{shown}");
}
