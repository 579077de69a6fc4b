// Subroutine and Program builders: the shapes the generator accumulates
// into and hands back to the caller's serializer.

use crate::instr_list::InstrList;
use smol_str::SmolStr;

/// One declared variable: its name and its cell size (> 1 for aggregates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: SmolStr,
    pub size: usize,
}

impl VarDecl {
    pub fn new(name: impl Into<SmolStr>, size: usize) -> Self {
        VarDecl { name: name.into(), size }
    }
}

/// A named TAC function: its parameters (with `_result` prepended for
/// value-returning functions), its locals, and its instruction body.
#[derive(Debug, Clone, Default)]
pub struct Subroutine {
    pub name: SmolStr,
    pub params: Vec<SmolStr>,
    pub locals: Vec<VarDecl>,
    pub body: InstrList,
}

impl Subroutine {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Subroutine { name: name.into(), params: Vec::new(), locals: Vec::new(), body: InstrList::new() }
    }

    pub fn add_param(&mut self, name: impl Into<SmolStr>) {
        self.params.push(name.into());
    }

    pub fn add_local(&mut self, decl: VarDecl) {
        self.locals.push(decl);
    }

    pub fn append_body(&mut self, code: InstrList) {
        self.body.extend(code);
    }
}

/// An ordered set of subroutines. No implicit entry point.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub subroutines: Vec<Subroutine>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sub: Subroutine) {
        self.subroutines.push(sub);
    }
}
