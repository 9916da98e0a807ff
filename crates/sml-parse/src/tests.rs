use crate::get;
use sml_cst::{Dec, Exp};
use source_file::SourceFile;

fn check<F>(s: &str, f: F)
where
  F: FnOnce(&Dec<'_>),
{
  let file = SourceFile::new("test.sml".into(), s.to_owned());
  let lexed = sml_lex::get(&file).expect("should lex");
  let tokens: Vec<_> = lexed.into_iter().filter(|tok| !tok.is_comment()).collect();
  let mut env = sml_fixity::Env::std_basis();
  let parsed = get(&tokens, &mut env).expect("should parse");
  f(&parsed);
}

/// Returns (message, offending source text) for a parse that should fail.
fn check_err(s: &str) -> (String, String) {
  let file = SourceFile::new("test.sml".into(), s.to_owned());
  let lexed = sml_lex::get(&file).expect("should lex");
  let tokens: Vec<_> = lexed.into_iter().filter(|tok| !tok.is_comment()).collect();
  let mut env = sml_fixity::Env::std_basis();
  let e = get(&tokens, &mut env).expect_err("should fail to parse");
  (e.to_string(), file.slice(e.range()).to_owned())
}

/// The decs of a sequence, or the dec itself.
fn decs<'a, 't>(d: &'a Dec<'t>) -> Vec<&'a Dec<'t>> {
  match d {
    Dec::Multiple { elems, .. } => elems.iter().collect(),
    d => vec![d],
  }
}

/// The bound expression of a `val` dec.
fn val_exp<'a, 't>(d: &'a Dec<'t>) -> &'a Exp<'t> {
  match d {
    Dec::Val { exp, .. } => exp,
    d => panic!("not a val dec: {d:?}"),
  }
}

/// Renders the expression compactly, parenthesized by tree shape, to make
/// asserting on reassembled infix trees painless.
fn sexp(e: &Exp<'_>) -> String {
  match e {
    Exp::Const(tok) | Exp::Ident { op_kw: None, name: tok } => tok.text.to_owned(),
    Exp::Ident { op_kw: Some(_), name } => format!("(op {})", name.text),
    Exp::Unit { .. } => "()".to_owned(),
    Exp::Parens { exp, .. } => sexp(exp),
    Exp::Tuple { elems, .. } => format!("(tuple {})", sexps(elems)),
    Exp::Sequence { elems, .. } => format!("(seq {})", sexps(elems)),
    Exp::List { elems, .. } => format!("(list {})", sexps(elems)),
    Exp::LetInEnd { exps, .. } => format!("(let {})", sexps(exps)),
    Exp::App { func, arg } => format!("(app {} {})", sexp(func), sexp(arg)),
    Exp::Infix { left, op, right } => format!("({} {} {})", sexp(left), op.text, sexp(right)),
    Exp::Typed { exp, .. } => format!("(typed {})", sexp(exp)),
    Exp::Andalso { left, right, .. } => format!("(andalso {} {})", sexp(left), sexp(right)),
    Exp::Orelse { left, right, .. } => format!("(orelse {} {})", sexp(left), sexp(right)),
    Exp::Handle { exp, matcher, .. } => format!("(handle {} {} arms)", sexp(exp), matcher.arms.len()),
    Exp::Raise { exp, .. } => format!("(raise {})", sexp(exp)),
    Exp::IfThenElse { cond, then_exp, else_exp, .. } => {
      format!("(if {} {} {})", sexp(cond), sexp(then_exp), sexp(else_exp))
    }
    Exp::WhileDo { cond, body, .. } => format!("(while {} {})", sexp(cond), sexp(body)),
    Exp::Case { exp, matcher, .. } => format!("(case {} {} arms)", sexp(exp), matcher.arms.len()),
    Exp::Fn { matcher, .. } => format!("(fn {} arms)", matcher.arms.len()),
  }
}

fn sexps(es: &[Exp<'_>]) -> String {
  es.iter().map(sexp).collect::<Vec<_>>().join(" ")
}

fn check_val_exp(s: &str, want: &str) {
  check(s, |d| assert_eq!(sexp(val_exp(d)), want));
}

#[test]
fn mul_binds_tighter_than_add() {
  check_val_exp("val x = 1 + 2 * 3", "(1 + (2 * 3))");
}

#[test]
fn sub_associates_left() {
  check_val_exp("val x = 1 - 2 - 3", "((1 - 2) - 3)");
}

#[test]
fn cons_associates_right() {
  check_val_exp("val x = a :: b :: nil", "(a :: (b :: nil))");
}

#[test]
fn eq_is_infix() {
  check_val_exp("val x = a = b", "(a = b)");
}

#[test]
fn mixed_precedences() {
  check_val_exp("val x = a + b * c = d :: e", "((a + (b * c)) = (d :: e))");
}

#[test]
fn later_fixity_declaration_wins() {
  check(
    "infix 5 @@ infixr 5 @@ val x = a @@ b @@ c",
    |d| {
      let ds = decs(d);
      assert_eq!(ds.len(), 3);
      assert_eq!(sexp(val_exp(ds[2])), "(a @@ (b @@ c))");
    },
  );
}

#[test]
fn ambiguous_infix() {
  let (msg, at) = check_err("infix 5 +++ infixr 5 --- val x = a +++ b --- c");
  assert_eq!(msg, "ambiguous infix expression");
  assert_eq!(at, "---");
}

#[test]
fn infix_scoped_to_let() {
  let s = "val a = let infix 9 ** in x ** y end\nval b = x ** y";
  check(s, |d| {
    let ds = decs(d);
    assert_eq!(sexp(val_exp(ds[0])), "(let (x ** y))");
    // outside the let, `**` has no fixity, so this is iterated application
    assert_eq!(sexp(val_exp(ds[1])), "(app (app x **) y)");
  });
}

#[test]
fn nonfix_scoped_to_let() {
  let s = "val a = let nonfix + in op + end\nval b = 1 + 2";
  check(s, |d| {
    let ds = decs(d);
    assert_eq!(sexp(val_exp(ds[1])), "(1 + 2)");
  });
}

#[test]
fn infix_without_op() {
  let (msg, at) = check_err("val x = +");
  assert_eq!(msg, "infix identifier not prefaced by `op`");
  assert_eq!(at, "+");
}

#[test]
fn op_allows_infix_name() {
  check_val_exp("val plus = op + (1, 2)", "(app (op +) (tuple 1 2))");
}

#[test]
fn application_is_fallback() {
  check_val_exp("val x = f y + g z", "((app f y) + (app g z))");
}

#[test]
fn andalso_binds_tighter_than_orelse() {
  check_val_exp("val x = a andalso b orelse c", "(orelse (andalso a b) c)");
  check_val_exp("val x = a orelse b andalso c", "(orelse a (andalso b c))");
}

#[test]
fn infix_binds_tighter_than_andalso() {
  check_val_exp("val x = a < b andalso c < d", "(andalso (a < b) (c < d))");
}

#[test]
fn raise_and_handle() {
  check_val_exp("val x = raise e", "(raise e)");
  check_val_exp("val x = f y handle z => 0", "(handle (app f y) 1 arms)");
}

#[test]
fn raise_not_an_infix_operand() {
  let (msg, _) = check_err("val x = 1 + raise e");
  assert_eq!(msg, "expected an expression");
}

#[test]
fn if_and_while() {
  check_val_exp("val x = if a then b else c", "(if a b c)");
  check_val_exp("val x = while a do f b", "(while a (app f b))");
}

#[test]
fn case_and_fn() {
  check_val_exp("val x = case xs of nil => 0 | y => 1", "(case xs 2 arms)");
  check_val_exp("val id = fn z => z", "(fn 1 arms)");
}

#[test]
fn tuples_sequences_lists() {
  check("val x = (1, 2, 3)", |d| match val_exp(d) {
    Exp::Tuple { elems, commas, .. } => {
      assert_eq!(elems.len(), 3);
      assert_eq!(commas.len(), 2);
    }
    e => panic!("not a tuple: {e:?}"),
  });
  check_val_exp("val x = (f a; g b; c)", "(seq (app f a) (app g b) c)");
  check_val_exp("val x = [1, 2]", "(list 1 2)");
  check_val_exp("val x = []", "(list )");
  check_val_exp("val x = ()", "()");
}

#[test]
fn let_in_end() {
  check_val_exp("val x = let val y = 1 in y; y end", "(let y y)");
}

#[test]
fn typed_exp() {
  check_val_exp("val x = (1 : int)", "(typed 1)");
}

#[test]
fn dec_sequences() {
  check("", |d| assert!(matches!(d, Dec::Empty)));
  check("val x = 1; val y = 2", |d| match d {
    Dec::Multiple { elems, delims } => {
      assert_eq!(elems.len(), 2);
      assert_eq!(delims.len(), 1);
      assert!(delims[0].is_some());
    }
    d => panic!("not a sequence: {d:?}"),
  });
  check("val x = 1 val y = 2", |d| match d {
    Dec::Multiple { elems, delims } => {
      assert_eq!(elems.len(), 2);
      assert!(delims[0].is_none());
    }
    d => panic!("not a sequence: {d:?}"),
  });
  // a trailing semicolon ends with an empty dec, keeping the arity invariant
  check("val x = 1;", |d| match d {
    Dec::Multiple { elems, delims } => {
      assert_eq!(elems.len(), 2);
      assert_eq!(delims.len(), 1);
      assert!(matches!(elems[1], Dec::Empty));
    }
    d => panic!("not a sequence: {d:?}"),
  });
}

#[test]
fn fun_dec() {
  check("fun add (a, b) : int = a + b", |d| match d {
    Dec::Fun { name, args, ret_ty, body, .. } => {
      assert_eq!(name.text, "add");
      assert_eq!(args.len(), 1);
      assert!(ret_ty.is_some());
      assert_eq!(sexp(body), "(a + b)");
    }
    d => panic!("not a fun dec: {d:?}"),
  });
}

#[test]
fn val_rec() {
  check("val rec f = fn x => f x", |d| match d {
    Dec::Val { rec_kw, .. } => assert!(rec_kw.is_some()),
    d => panic!("not a val dec: {d:?}"),
  });
}

#[test]
fn type_dec() {
  check("type ('a, 'b) pair = 'a * 'b", |d| match d {
    Dec::Type { tycon, .. } => assert_eq!(tycon.text, "pair"),
    d => panic!("not a type dec: {d:?}"),
  });
  check("type t = int -> int * bool", |_| {});
}

#[test]
fn not_yet_implemented() {
  let (msg, _) = check_err("val x = 1 and y = 2");
  assert_eq!(msg, "not yet implemented: `and` declaration chains");
  let (msg, _) = check_err("fun f 0 = 1 | f n = 2");
  assert_eq!(msg, "not yet implemented: multiple `fun` clauses");
  let (msg, _) = check_err("val x = {a = 1}");
  assert_eq!(msg, "not yet implemented: record expressions");
  let (msg, _) = check_err("val {a, b} = c");
  assert_eq!(msg, "not yet implemented: record patterns");
  let (msg, at) = check_err("val h :: t = l");
  assert_eq!(msg, "not yet implemented: infix constructor patterns");
  assert_eq!(at, "::");
}

#[test]
fn leftover_tokens() {
  let (msg, at) = check_err("val x = 1 )");
  assert_eq!(msg, "expected a declaration");
  assert_eq!(at, ")");
  let (msg, at) = check_err("structure S = struct end");
  assert_eq!(msg, "expected a declaration");
  assert_eq!(at, "structure");
}

#[test]
fn missing_expected_token() {
  let (msg, _) = check_err("val x = (1, 2");
  assert_eq!(msg, "expected `)`");
  let (msg, _) = check_err("val x = let val y = 1 in y");
  assert_eq!(msg, "expected `end`");
}

#[test]
fn long_identifiers_in_exp_and_ty() {
  check_val_exp("val x = A.B.c y", "(app A.B.c y)");
  check("val f = g : 'a Option.option -> int", |_| {});
}
