// MiniLang TAC code generation core
// Tree-walking visitor that turns a semantically-analyzed syntax tree into
// linear three-address code for a register/stack virtual machine.

pub mod ast;
pub mod code_attribs;
pub mod codegen;
pub mod config;
pub mod counter;
pub mod error;
pub mod instr;
pub mod instr_list;
pub mod program;
pub mod symtab;
pub mod types;

pub use code_attribs::CodeAttribs;
pub use codegen::Codegen;
pub use config::CodegenConfig;
pub use counter::{Counter, LabelFamily};
pub use error::CodegenBug;
pub use instr::Instruction;
pub use instr_list::InstrList;
pub use program::{Program, Subroutine, VarDecl};
pub use symtab::{BasicSymbolTable, ScopeId, SymbolTable};
pub use types::{BasicTypeManager, TypeId, TypeManager};

/// Generates a [`Program`] from an already-decorated syntax tree. Thin
/// wrapper around [`Codegen`] for callers that don't need to hold the
/// generator across multiple compiles.
pub fn generate(
    tree: &ast::Program,
    symtab: &mut impl SymbolTable,
    types: &impl TypeManager,
    config: CodegenConfig,
) -> Program {
    Codegen::new(symtab, types, config).generate_program(tree)
}
