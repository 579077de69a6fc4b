// Left-expression synthesis: the l-value form of identifiers and indexed
// array elements. Returns (base, scaled-offset, code) — crossing the
// addr/offs convention with the r-value form is the most likely port bug,
// so this module keeps the two forms physically separate from `expr.rs`.

use super::Codegen;
use super::expr::gen_expr;
use crate::ast::LExpr;
use crate::code_attribs::CodeAttribs;
use crate::instr::Instruction;
use crate::instr_list::InstrList;
use crate::symtab::SymbolTable;
use crate::types::TypeManager;

/// Visits a left-expression. A bare identifier returns `(id, "", empty)`.
/// An indexed form `id[e]` returns `(base, scaled_offset, code)`, where
/// `base` is `id` itself for a value-class local, or a freshly materialized
/// base pointer for a reference-class parameter.
pub(crate) fn gen_lexpr<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    lexpr: &LExpr,
) -> CodeAttribs {
    match lexpr {
        LExpr::Ident { name, .. } => CodeAttribs::simple(name.clone(), InstrList::new()),
        LExpr::Index { id, index, .. } => {
            let index_attrs = gen_expr(cg, index);
            let mut code = index_attrs.code;

            let t = cg.counter.new_temp();
            if !cg.config.elide_unit_multiplier() {
                code.push(Instruction::iload(t.clone(), "1"));
                code.push(Instruction::mul(t.clone(), index_attrs.addr.clone(), t.clone()));
            } else {
                code.push(Instruction::load(t.clone(), index_attrs.addr.clone()));
            }

            let base = if cg.symtab.is_local(id) {
                id.clone()
            } else {
                let base_reg = cg.counter.new_temp();
                log::trace!("materializing reference base `{id}` for indexed l-value");
                code.push(Instruction::load(base_reg.clone(), id.clone()));
                base_reg
            };

            CodeAttribs::new(base, t, code)
        }
    }
}
