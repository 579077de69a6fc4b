// The tree-walking code generator: one visit rule per grammar production.
// Statement visits return an instruction list; expression visits return a
// CodeAttribs. Dedicated return types per visit method rather than a
// type-erased value — a tagged variant buys nothing here.

mod call;
mod expr;
mod lvalue;
mod stmt;

#[cfg(test)]
mod scenarios;

use crate::ast;
use crate::config::CodegenConfig;
use crate::counter::Counter;
use crate::instr::Instruction;
use crate::instr_list::InstrList;
use crate::program::{Program, Subroutine, VarDecl};
use crate::symtab::SymbolTable;
use crate::types::TypeManager;

/// Holds exclusive mutable access to the symbol table, the program under
/// construction, and the per-subroutine counters for the duration of one
/// compile. `symtab` and `types` are non-owning handles supplied by the
/// caller; they must outlive the generator.
pub struct Codegen<'a, S: SymbolTable, T: TypeManager> {
    symtab: &'a mut S,
    types: &'a T,
    config: CodegenConfig,
    counter: Counter,
}

impl<'a, S: SymbolTable, T: TypeManager> Codegen<'a, S, T> {
    pub fn new(symtab: &'a mut S, types: &'a T, config: CodegenConfig) -> Self {
        Codegen { symtab, types, config, counter: Counter::new() }
    }

    pub fn generate_program(&mut self, prog: &ast::Program) -> Program {
        log::debug!("entering program scope {:?}", prog.scope);
        self.symtab.push_scope(prog.scope);
        let mut out = Program::new();
        for function in &prog.functions {
            out.push(self.generate_function(function));
        }
        self.symtab.pop_scope();
        out
    }

    fn generate_function(&mut self, function: &ast::Function) -> Subroutine {
        log::debug!("generating subroutine `{}`; resetting counters", function.name);
        self.symtab.push_scope(function.scope);
        self.counter.reset();

        let mut sub = Subroutine::new(function.name.clone());
        for decl in &function.decls {
            sub.add_local(VarDecl::new(decl.name.clone(), self.types.cell_size(decl.ty)));
        }
        if !self.types.is_void_function(function.ty) {
            sub.add_param("_result");
        }
        for param in &function.params {
            sub.add_param(param.name.clone());
        }

        let body = stmt::gen_stmt_list(self, &function.body);
        sub.append_body(body);
        sub.append_body(InstrList::one(Instruction::ret()));

        self.symtab.pop_scope();
        sub
    }
}
