//! The concrete syntax tree.
//!
//! Every node holds the tokens that produced it, delimiters and keywords
//! included, so an in-order walk reads back the token stream the parser
//! consumed. Nothing here is normalized away; that is the point.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

use sml_token::TokenKind;

/// A token of the main language.
pub type Token<'a> = sml_token::Token<'a, TokenKind>;

/// A sequence that is either absent, a single bare element, or delimited
/// elements between brackets, like type variable sequences: nothing, `'a`,
/// or `('a, 'b)`.
///
/// For `Many`, `delims.len() == elems.len() - 1`.
#[derive(Debug)]
pub enum SyntaxSeq<'a, T> {
  /// No elements.
  Empty,
  /// One element, no brackets.
  One(T),
  /// `left elem (delim elem)* right`.
  Many {
    /// The opening bracket.
    left: Token<'a>,
    /// The elements.
    elems: Vec<T>,
    /// The delimiters between the elements.
    delims: Vec<Token<'a>>,
    /// The closing bracket.
    right: Token<'a>,
  },
}

/// An expression.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Exp<'a> {
  /// A constant, like `3` or `"hi"`.
  Const(Token<'a>),
  /// `[op] longvid`.
  Ident { op_kw: Option<Token<'a>>, name: Token<'a> },
  /// `( )`
  Unit { lround: Token<'a>, rround: Token<'a> },
  /// `( exp )`
  Parens { lround: Token<'a>, exp: Box<Exp<'a>>, rround: Token<'a> },
  /// `( exp , exp , ... )`, two or more. `commas.len() == elems.len() - 1`.
  Tuple { lround: Token<'a>, elems: Vec<Exp<'a>>, commas: Vec<Token<'a>>, rround: Token<'a> },
  /// `( exp ; exp ; ... )`, two or more.
  Sequence {
    lround: Token<'a>,
    elems: Vec<Exp<'a>>,
    semicolons: Vec<Token<'a>>,
    rround: Token<'a>,
  },
  /// `[ exp , ... ]`, possibly empty.
  List { lsquare: Token<'a>, elems: Vec<Exp<'a>>, commas: Vec<Token<'a>>, rsquare: Token<'a> },
  /// `let dec in exp ; ... ; exp end`
  LetInEnd {
    let_kw: Token<'a>,
    dec: Box<Dec<'a>>,
    in_kw: Token<'a>,
    exps: Vec<Exp<'a>>,
    semicolons: Vec<Token<'a>>,
    end_kw: Token<'a>,
  },
  /// `exp exp`
  App { func: Box<Exp<'a>>, arg: Box<Exp<'a>> },
  /// `exp vid exp`, where `vid` was infix at this position.
  Infix { left: Box<Exp<'a>>, op: Token<'a>, right: Box<Exp<'a>> },
  /// `exp : ty`
  Typed { exp: Box<Exp<'a>>, colon: Token<'a>, ty: Ty<'a> },
  /// `exp andalso exp`
  Andalso { left: Box<Exp<'a>>, andalso_kw: Token<'a>, right: Box<Exp<'a>> },
  /// `exp orelse exp`
  Orelse { left: Box<Exp<'a>>, orelse_kw: Token<'a>, right: Box<Exp<'a>> },
  /// `exp handle match`
  Handle { exp: Box<Exp<'a>>, handle_kw: Token<'a>, matcher: Match<'a> },
  /// `raise exp`
  Raise { raise_kw: Token<'a>, exp: Box<Exp<'a>> },
  /// `if exp then exp else exp`
  IfThenElse {
    if_kw: Token<'a>,
    cond: Box<Exp<'a>>,
    then_kw: Token<'a>,
    then_exp: Box<Exp<'a>>,
    else_kw: Token<'a>,
    else_exp: Box<Exp<'a>>,
  },
  /// `while exp do exp`
  WhileDo { while_kw: Token<'a>, cond: Box<Exp<'a>>, do_kw: Token<'a>, body: Box<Exp<'a>> },
  /// `case exp of match`
  Case { case_kw: Token<'a>, exp: Box<Exp<'a>>, of_kw: Token<'a>, matcher: Match<'a> },
  /// `fn match`
  Fn { fn_kw: Token<'a>, matcher: Match<'a> },
}

impl Exp<'_> {
  /// Returns whether this is an `Infix` node.
  #[must_use]
  pub fn is_infix(&self) -> bool {
    matches!(self, Exp::Infix { .. })
  }
}

/// One or more `pat => exp` arms separated by `|`.
///
/// `bars.len() == arms.len() - 1`.
#[derive(Debug)]
pub struct Match<'a> {
  /// The arms.
  pub arms: Vec<Arm<'a>>,
  /// The `|` tokens between the arms.
  pub bars: Vec<Token<'a>>,
}

/// A single `pat => exp` arm.
#[derive(Debug)]
pub struct Arm<'a> {
  /// The pattern.
  pub pat: Pat<'a>,
  /// The `=>`.
  pub arrow: Token<'a>,
  /// The expression.
  pub exp: Exp<'a>,
}

/// A pattern.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Pat<'a> {
  /// `_`
  Wild(Token<'a>),
  /// A constant.
  Const(Token<'a>),
  /// `[op] longvid`
  Ident { op_kw: Option<Token<'a>>, name: Token<'a> },
  /// `( )`
  Unit { lround: Token<'a>, rround: Token<'a> },
  /// `( pat )`
  Parens { lround: Token<'a>, pat: Box<Pat<'a>>, rround: Token<'a> },
  /// `( pat , pat , ... )`, two or more.
  Tuple { lround: Token<'a>, elems: Vec<Pat<'a>>, commas: Vec<Token<'a>>, rround: Token<'a> },
  /// `[ pat , ... ]`, possibly empty.
  List { lsquare: Token<'a>, elems: Vec<Pat<'a>>, commas: Vec<Token<'a>>, rsquare: Token<'a> },
}

/// A type expression.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Ty<'a> {
  /// `'a`
  Var(Token<'a>),
  /// `longtycon`, `ty longtycon`, or `( ty , ... ) longtycon`.
  Con { args: Box<SyntaxSeq<'a, Ty<'a>>>, tycon: Token<'a> },
  /// `ty -> ty`
  Arrow { param: Box<Ty<'a>>, arrow: Token<'a>, res: Box<Ty<'a>> },
  /// `ty * ... * ty`, two or more. `stars.len() == elems.len() - 1`.
  Tuple { elems: Vec<Ty<'a>>, stars: Vec<Token<'a>> },
  /// `( ty )`
  Parens { lround: Token<'a>, ty: Box<Ty<'a>>, rround: Token<'a> },
}

/// A `: ty` annotation.
#[derive(Debug)]
pub struct TyAnnotation<'a> {
  /// The `:`.
  pub colon: Token<'a>,
  /// The type.
  pub ty: Ty<'a>,
}

/// A declaration.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum Dec<'a> {
  /// `val tyvarseq [rec] pat = exp`
  Val {
    val_kw: Token<'a>,
    tyvars: SyntaxSeq<'a, Token<'a>>,
    rec_kw: Option<Token<'a>>,
    pat: Pat<'a>,
    eq: Token<'a>,
    exp: Exp<'a>,
  },
  /// `fun tyvarseq [op] vid atpat ... [: ty] = exp`
  Fun {
    fun_kw: Token<'a>,
    tyvars: SyntaxSeq<'a, Token<'a>>,
    op_kw: Option<Token<'a>>,
    name: Token<'a>,
    args: Vec<Pat<'a>>,
    ret_ty: Option<TyAnnotation<'a>>,
    eq: Token<'a>,
    body: Exp<'a>,
  },
  /// `type tyvarseq tycon = ty`
  Type {
    type_kw: Token<'a>,
    tyvars: SyntaxSeq<'a, Token<'a>>,
    tycon: Token<'a>,
    eq: Token<'a>,
    ty: Ty<'a>,
  },
  /// `infix [d] vid ...`
  Infix { infix_kw: Token<'a>, prec: Option<Token<'a>>, names: Vec<Token<'a>> },
  /// `infixr [d] vid ...`
  Infixr { infixr_kw: Token<'a>, prec: Option<Token<'a>>, names: Vec<Token<'a>> },
  /// `nonfix vid ...`
  Nonfix { nonfix_kw: Token<'a>, names: Vec<Token<'a>> },
  /// Two or more declarations with optional `;` between them.
  /// `delims.len() == elems.len() - 1`.
  Multiple { elems: Vec<Dec<'a>>, delims: Vec<Option<Token<'a>>> },
  /// No declaration at all.
  Empty,
}
