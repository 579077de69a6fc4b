// The calling sequence shared by procedure-call statements and
// value-returning functional-call expressions.

use super::Codegen;
use super::expr::gen_expr;
use crate::ast::CallExpr;
use crate::instr::Instruction;
use crate::instr_list::InstrList;
use crate::symtab::SymbolTable;
use crate::types::TypeManager;
use smol_str::SmolStr;

/// Emits the shared call sequence and returns the fresh temporary holding
/// the result, if the callee produces one. Void and non-void calls reserve
/// (and, past the argument pops, pop) a result slot identically — a
/// procedure-call statement to a non-void procedure still gets the leading
/// `PUSH` and trailing `POP t`, it just discards `t`.
pub(crate) fn gen_call<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    call: &CallExpr,
) -> (Option<SmolStr>, InstrList) {
    let mut code = InstrList::new();
    let returns_value = !cg.types.is_void_function(call.fn_ty);
    if returns_value {
        code.push(Instruction::push());
    }

    let formal_types = cg.types.function_parameter_types(call.fn_ty).to_vec();
    for (i, arg) in call.args.iter().enumerate() {
        let attrs = gen_expr(cg, arg);
        code.extend(attrs.code);
        let mut operand = attrs.addr;
        let actual_ty = arg.ty();

        if let Some(&formal_ty) = formal_types.get(i) {
            if cg.types.is_float(formal_ty) && cg.types.is_integer(actual_ty) {
                let t = cg.counter.new_temp();
                code.push(Instruction::float(t.clone(), operand));
                operand = t;
            }
        }

        if cg.types.is_array(actual_ty) {
            log::trace!("materializing array argument address for call to `{}`", call.callee);
            let t = cg.counter.new_temp();
            code.push(Instruction::aload(t.clone(), operand));
            operand = t;
        }

        code.push(Instruction::push_val(operand));
    }

    // Uses the raw callee text regardless of argument count, which also
    // covers the zero-argument case reaching past any decoration.
    code.push(Instruction::call(call.callee.clone()));

    for _ in 0..call.args.len() {
        code.push(Instruction::pop());
    }

    let result = if returns_value {
        let t = cg.counter.new_temp();
        code.push(Instruction::pop_into(t.clone()));
        Some(t)
    } else {
        None
    };

    (result, code)
}
