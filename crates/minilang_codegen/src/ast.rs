// Decorated syntax tree node shapes.
//
// The generator treats the tree as already built and already decorated by
// an external semantic analyzer — this module only fixes the concrete node
// shape a Rust visitor pattern-matches on. Scope and type decorations are
// carried as inline fields rather than a side-table; that is an equally
// valid reading of "decorated tree" and is simpler to thread through a
// visitor than a second lookup structure.

use crate::symtab::ScopeId;
use crate::types::TypeId;
use smol_str::SmolStr;

#[derive(Debug, Clone)]
pub struct Program {
    pub scope: ScopeId,
    pub functions: Vec<Function>,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: SmolStr,
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub struct Decl {
    pub name: SmolStr,
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: SmolStr,
    pub scope: ScopeId,
    /// The function's own type, queried for `is_void_function` and
    /// `function_parameter_types` at call sites.
    pub ty: TypeId,
    pub params: Vec<Param>,
    pub decls: Vec<Decl>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Assign { lhs: LExpr, rhs: Expr },
    If { cond: Expr, then_branch: Vec<Stmt>, else_branch: Option<Vec<Stmt>> },
    While { cond: Expr, body: Vec<Stmt> },
    Call(CallExpr),
    Return(Option<Expr>),
    Read(LExpr),
    WriteExpr(Expr),
    /// Raw source text of a string literal, quotes included; the write
    /// visitor strips them and scans escapes itself.
    WriteString(SmolStr),
}

#[derive(Debug, Clone)]
pub enum LExpr {
    Ident { name: SmolStr, ty: TypeId },
    Index { id: SmolStr, index: Box<Expr>, ty: TypeId },
}

impl LExpr {
    pub fn ty(&self) -> TypeId {
        match self {
            LExpr::Ident { ty, .. } => *ty,
            LExpr::Index { ty, .. } => *ty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Le,
    Lt,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone)]
pub enum Literal {
    Int(SmolStr),
    Float(SmolStr),
    Char(SmolStr),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: SmolStr,
    pub args: Vec<Expr>,
    /// The callee's function type, for `is_void_function` and
    /// `function_parameter_types` lookups.
    pub fn_ty: TypeId,
    /// The call's value type. Meaningless (never read) when `fn_ty` is
    /// void; a well-typed tree never uses a void call in value position.
    pub result_ty: TypeId,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Literal { value: Literal, ty: TypeId },
    /// r-value identifier reference; dereference happens implicitly in
    /// downstream opcodes.
    Ident { name: SmolStr, ty: TypeId },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr>, ty: TypeId },
    Unary { op: UnOp, operand: Box<Expr>, ty: TypeId },
    /// r-value array access `id[index]`.
    Index { id: SmolStr, index: Box<Expr>, ty: TypeId },
    Call(CallExpr),
}

impl Expr {
    pub fn ty(&self) -> TypeId {
        match self {
            Expr::Literal { ty, .. } => *ty,
            Expr::Ident { ty, .. } => *ty,
            Expr::Binary { ty, .. } => *ty,
            Expr::Unary { ty, .. } => *ty,
            Expr::Index { ty, .. } => *ty,
            Expr::Call(call) => call.result_ty,
        }
    }
}
