// Expression visits: literals, identifiers, unary/binary operators, the
// r-value indexer, and functional calls. Every rule here returns a
// CodeAttribs with `offs` empty — only `lvalue.rs` produces an indexed
// (addr, offs) pair.

use super::Codegen;
use super::call::gen_call;
use super::lvalue::gen_lexpr;
use crate::ast::{BinOp, Expr, LExpr, Literal, UnOp};
use crate::code_attribs::CodeAttribs;
use crate::error::{CodegenBug, codegen_bug};
use crate::instr::Instruction;
use crate::instr_list::InstrList;
use crate::symtab::SymbolTable;
use crate::types::{TypeId, TypeManager};

pub(crate) fn gen_expr<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    expr: &Expr,
) -> CodeAttribs {
    match expr {
        Expr::Literal { value, .. } => gen_literal(cg, value),
        Expr::Ident { name, .. } => CodeAttribs::simple(name.clone(), InstrList::new()),
        Expr::Unary { op, operand, ty } => gen_unary(cg, *op, operand, *ty),
        Expr::Binary { op, lhs, rhs, ty } => gen_binary(cg, *op, lhs, rhs, *ty),
        Expr::Index { id, index, .. } => gen_indexer(cg, id, index),
        Expr::Call(call) => {
            let (result, code) = gen_call(cg, call);
            match result {
                Some(t) => CodeAttribs::simple(t, code),
                None => codegen_bug(CodegenBug::Internal(format!(
                    "call to void function `{}` used in value position",
                    call.callee
                ))),
            }
        }
    }
}

fn gen_literal<S: SymbolTable, T: TypeManager>(cg: &mut Codegen<S, T>, lit: &Literal) -> CodeAttribs {
    let t = cg.counter.new_temp();
    let code = match lit {
        Literal::Int(text) => InstrList::one(Instruction::iload(t.clone(), text.clone())),
        Literal::Float(text) => InstrList::one(Instruction::fload(t.clone(), text.clone())),
        Literal::Char(text) => {
            let stripped = strip_char_quotes(text);
            InstrList::one(Instruction::chload(t.clone(), stripped))
        }
        Literal::Bool(b) => InstrList::one(Instruction::iload(t.clone(), if *b { "1" } else { "0" })),
    };
    CodeAttribs::simple(t, code)
}

/// Strips the surrounding quotes off a char literal's source text, e.g.
/// `'a'` -> `a`. Falls back to the raw text if it isn't quoted (a
/// well-formed tree never hits that branch).
fn strip_char_quotes(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'' {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}

fn gen_unary<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    op: UnOp,
    operand: &Expr,
    ty: TypeId,
) -> CodeAttribs {
    let attrs = gen_expr(cg, operand);

    // Unary `+` is a no-op: the operand's own address is reused verbatim,
    // no temp allocated and no instruction emitted (matches the original
    // `else // ctx->ADD()` branch's bare `temp = addr;` rebinding).
    if matches!(op, UnOp::Pos) {
        return CodeAttribs::simple(attrs.addr, attrs.code);
    }

    let mut code = attrs.code;
    let t = cg.counter.new_temp();

    if cg.types.is_float(ty) {
        match op {
            UnOp::Neg => code.push(Instruction::fneg(t.clone(), attrs.addr.clone())),
            UnOp::Pos => unreachable!("UnOp::Pos returns earlier"),
            UnOp::Not => codegen_bug(CodegenBug::Internal("NOT applied to a float operand".into())),
        }
    } else {
        match op {
            UnOp::Neg => code.push(Instruction::neg(t.clone(), attrs.addr.clone())),
            UnOp::Pos => unreachable!("UnOp::Pos returns earlier"),
            UnOp::Not => code.push(Instruction::not(t.clone(), attrs.addr.clone())),
        }
    }

    CodeAttribs::simple(t, code)
}

fn gen_binary<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    result_ty: TypeId,
) -> CodeAttribs {
    match op {
        BinOp::And | BinOp::Or => gen_logical(cg, op, lhs, rhs),
        BinOp::Eq | BinOp::Neq | BinOp::Le | BinOp::Lt | BinOp::Gt | BinOp::Ge => {
            gen_relational(cg, op, lhs, rhs)
        }
        BinOp::Mod => gen_mod(cg, lhs, rhs),
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => {
            gen_arith(cg, op, lhs, rhs, result_ty)
        }
    }
}

/// Strict (non-short-circuiting) `and`/`or`: both operands' code is
/// emitted unconditionally. See SPEC_FULL.md §9 for the open-question
/// decision to keep it this way.
fn gen_logical<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
) -> CodeAttribs {
    let l = gen_expr(cg, lhs);
    let r = gen_expr(cg, rhs);
    let mut code = l.code;
    code.extend(r.code);

    let t = cg.counter.new_temp();
    code.push(match op {
        BinOp::And => Instruction::and(t.clone(), l.addr, r.addr),
        BinOp::Or => Instruction::or(t.clone(), l.addr, r.addr),
        _ => unreachable!("gen_logical only called for And/Or"),
    });
    CodeAttribs::simple(t, code)
}

fn gen_mod<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    lhs: &Expr,
    rhs: &Expr,
) -> CodeAttribs {
    let l = gen_expr(cg, lhs);
    let r = gen_expr(cg, rhs);
    let mut code = l.code;
    code.extend(r.code);

    let q = cg.counter.new_temp();
    let rem = cg.counter.new_temp();
    let t = cg.counter.new_temp();
    code.push(Instruction::div(q.clone(), l.addr.clone(), r.addr.clone()));
    code.push(Instruction::mul(rem.clone(), q, r.addr));
    code.push(Instruction::sub(t.clone(), l.addr, rem));
    CodeAttribs::simple(t, code)
}

fn gen_arith<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    result_ty: TypeId,
) -> CodeAttribs {
    let float_result = cg.types.is_float(result_ty);
    let l = gen_expr(cg, lhs);
    let mut code = l.code;
    let a = if float_result { coerce_operand(cg, &mut code, l.addr, lhs.ty()) } else { l.addr };

    let r = gen_expr(cg, rhs);
    code.extend(r.code);
    let b = if float_result { coerce_operand(cg, &mut code, r.addr, rhs.ty()) } else { r.addr };

    let t = cg.counter.new_temp();
    let instr = match (float_result, op) {
        (false, BinOp::Add) => Instruction::add(t.clone(), a, b),
        (false, BinOp::Sub) => Instruction::sub(t.clone(), a, b),
        (false, BinOp::Mul) => Instruction::mul(t.clone(), a, b),
        (false, BinOp::Div) => Instruction::div(t.clone(), a, b),
        (true, BinOp::Add) => Instruction::fadd(t.clone(), a, b),
        (true, BinOp::Sub) => Instruction::fsub(t.clone(), a, b),
        (true, BinOp::Mul) => Instruction::fmul(t.clone(), a, b),
        (true, BinOp::Div) => Instruction::fdiv(t.clone(), a, b),
        _ => codegen_bug(CodegenBug::Internal("non-arithmetic op reached gen_arith".into())),
    };
    code.push(instr);
    CodeAttribs::simple(t, code)
}

/// Coerces `operand` (decorated type `operand_ty`) to float if needed,
/// emitting `FLOAT t, operand` into `code` and returning the new operand
/// name. Returns `operand` unchanged if it is already float.
fn coerce_operand<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    code: &mut InstrList,
    operand: smol_str::SmolStr,
    operand_ty: TypeId,
) -> smol_str::SmolStr {
    if cg.types.is_integer(operand_ty) {
        let t = cg.counter.new_temp();
        code.push(Instruction::float(t.clone(), operand));
        t
    } else {
        operand
    }
}

fn gen_relational<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
) -> CodeAttribs {
    let lty = lhs.ty();
    let rty = rhs.ty();
    let use_integer_compare = (cg.types.is_integer(lty) && cg.types.is_integer(rty))
        || (cg.types.is_character(lty) && cg.types.is_character(rty));

    let l = gen_expr(cg, lhs);
    let mut code = l.code;
    let a = if use_integer_compare { l.addr } else { coerce_operand(cg, &mut code, l.addr, lty) };

    let r = gen_expr(cg, rhs);
    code.extend(r.code);
    let b = if use_integer_compare { r.addr } else { coerce_operand(cg, &mut code, r.addr, rty) };

    let t = cg.counter.new_temp();
    if use_integer_compare {
        match op {
            BinOp::Eq => code.push(Instruction::eq(t.clone(), a, b)),
            BinOp::Le => code.push(Instruction::le(t.clone(), a, b)),
            BinOp::Lt => code.push(Instruction::lt(t.clone(), a, b)),
            BinOp::Neq => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::eq(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            BinOp::Gt => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::le(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            BinOp::Ge => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::lt(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            _ => codegen_bug(CodegenBug::Internal("non-relational op reached gen_relational".into())),
        }
    } else {
        match op {
            BinOp::Eq => code.push(Instruction::feq(t.clone(), a, b)),
            BinOp::Le => code.push(Instruction::fle(t.clone(), a, b)),
            BinOp::Lt => code.push(Instruction::flt(t.clone(), a, b)),
            BinOp::Neq => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::feq(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            BinOp::Gt => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::fle(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            BinOp::Ge => {
                let raw = cg.counter.new_temp();
                code.push(Instruction::flt(raw.clone(), a, b));
                code.push(Instruction::not(t.clone(), raw));
            }
            _ => codegen_bug(CodegenBug::Internal("non-relational op reached gen_relational".into())),
        }
    }

    CodeAttribs::simple(t, code)
}

/// r-value array access `id[index]`: scale the index the same way
/// `lvalue::gen_lexpr` does, then load through it.
fn gen_indexer<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    id: &smol_str::SmolStr,
    index: &Expr,
) -> CodeAttribs {
    let lexpr = LExpr::Index { id: id.clone(), index: Box::new(index.clone()), ty: index.ty() };
    let base_attrs = gen_lexpr(cg, &lexpr);
    let mut code = base_attrs.code;
    let t = cg.counter.new_temp();
    code.push(Instruction::loadx(t.clone(), base_attrs.addr, base_attrs.offs));
    CodeAttribs::simple(t, code)
}
