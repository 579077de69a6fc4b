// Statement visits. Every rule here returns an InstrList; expression
// synthesis is delegated to `expr.rs`/`lvalue.rs`/`call.rs`.

use super::Codegen;
use super::call::gen_call;
use super::expr::gen_expr;
use super::lvalue::gen_lexpr;
use crate::ast::{LExpr, Stmt};
use crate::counter::LabelFamily;
use crate::instr::Instruction;
use crate::instr_list::InstrList;
use crate::symtab::SymbolTable;
use crate::types::TypeManager;
use smol_str::SmolStr;

pub(crate) fn gen_stmt_list<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    stmts: &[Stmt],
) -> InstrList {
    let mut code = InstrList::new();
    for stmt in stmts {
        code.extend(gen_stmt(cg, stmt));
    }
    code
}

fn gen_stmt<S: SymbolTable, T: TypeManager>(cg: &mut Codegen<S, T>, stmt: &Stmt) -> InstrList {
    match stmt {
        Stmt::Assign { lhs, rhs } => gen_assign(cg, lhs, rhs),
        Stmt::If { cond, then_branch, else_branch } => {
            gen_if(cg, cond, then_branch, else_branch.as_deref())
        }
        Stmt::While { cond, body } => gen_while(cg, cond, body),
        Stmt::Call(call) => {
            let (_, code) = gen_call(cg, call);
            code
        }
        Stmt::Return(expr) => gen_return(cg, expr.as_ref()),
        Stmt::Read(lexpr) => gen_read(cg, lexpr),
        Stmt::WriteExpr(expr) => gen_write_expr(cg, expr),
        Stmt::WriteString(text) => gen_write_string(cg, text),
    }
}

/// `L = R`. Emission order: `code1 ; code2 ; coercion/copy ; store`.
fn gen_assign<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    lhs: &LExpr,
    rhs: &crate::ast::Expr,
) -> InstrList {
    let l = gen_lexpr(cg, lhs);
    let r = gen_expr(cg, rhs);
    let mut code = l.code;
    code.extend(r.code);

    let lty = lhs.ty();
    let rty = rhs.ty();

    if cg.types.is_array(lty) && cg.types.is_array(rty) {
        code.extend(gen_array_copy(cg, lhs, rhs, lty));
        return code;
    }

    let mut value = r.addr;
    if cg.types.is_float(lty) && cg.types.is_integer(rty) {
        let t = cg.counter.new_temp();
        code.push(Instruction::float(t.clone(), value));
        value = t;
    }

    if l.is_indexed() {
        code.push(Instruction::xload(l.addr, l.offs, value));
    } else {
        code.push(Instruction::load(l.addr, value));
    }
    code
}

/// In-place element-wise array copy loop (§4, Assignment rule, array case).
/// The left-expression's own code was already spliced into the caller;
/// this only needs the destination and source identifiers themselves.
fn gen_array_copy<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    lhs: &LExpr,
    rhs: &crate::ast::Expr,
    array_ty: crate::types::TypeId,
) -> InstrList {
    let mut code = InstrList::new();

    let lhs_name = lexpr_ident_name(lhs);
    let rhs_name = expr_ident_name(rhs);

    let base1 = if cg.symtab.is_local(&lhs_name) {
        lhs_name.clone()
    } else {
        let t = cg.counter.new_temp();
        log::trace!("materializing reference base `{lhs_name}` for array-copy destination");
        code.push(Instruction::load(t.clone(), lhs_name.clone()));
        t
    };
    let base2 = if cg.symtab.is_local(&rhs_name) {
        rhs_name.clone()
    } else {
        let t = cg.counter.new_temp();
        log::trace!("materializing reference base `{rhs_name}` for array-copy source");
        code.push(Instruction::load(t.clone(), rhs_name.clone()));
        t
    };

    let index = cg.counter.new_temp();
    let inc = cg.counter.new_temp();
    let size = cg.counter.new_temp();
    let off = cg.counter.new_temp();
    let cmp = cg.counter.new_temp();
    let addr = cg.counter.new_temp();
    let value = cg.counter.new_temp();

    let n = cg.types.array_element_count(array_ty);
    let k = cg.counter.new_label(LabelFamily::While);
    let while_label = SmolStr::new(format!("while_{k}"));
    let end_label = SmolStr::new(format!("endwhile_{k}"));

    code.push(Instruction::iload(index.clone(), "0"));
    code.push(Instruction::iload(inc.clone(), "1"));
    code.push(Instruction::iload(size.clone(), n.to_string()));
    code.push(Instruction::iload(off.clone(), "1"));
    code.push(Instruction::label(while_label.clone()));
    code.push(Instruction::lt(cmp.clone(), index.clone(), size.clone()));
    code.push(Instruction::fjump(cmp.clone(), end_label.clone()));
    code.push(Instruction::mul(addr.clone(), off.clone(), index.clone()));
    code.push(Instruction::loadx(value.clone(), base2, addr.clone()));
    code.push(Instruction::xload(base1, addr.clone(), value));
    code.push(Instruction::add(index.clone(), index.clone(), inc));
    code.push(Instruction::ujump(while_label));
    code.push(Instruction::label(end_label));
    code
}

fn lexpr_ident_name(lexpr: &LExpr) -> SmolStr {
    match lexpr {
        LExpr::Ident { name, .. } => name.clone(),
        LExpr::Index { id, .. } => id.clone(),
    }
}

fn expr_ident_name(expr: &crate::ast::Expr) -> SmolStr {
    match expr {
        crate::ast::Expr::Ident { name, .. } => name.clone(),
        other => crate::error::codegen_bug(crate::error::CodegenBug::Internal(format!(
            "array-typed expression is not a bare identifier: {other:?}"
        ))),
    }
}

fn gen_if<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    cond: &crate::ast::Expr,
    then_branch: &[Stmt],
    else_branch: Option<&[Stmt]>,
) -> InstrList {
    let cond_attrs = gen_expr(cg, cond);
    let k = cg.counter.new_label(LabelFamily::If);
    let mut code = cond_attrs.code;

    match else_branch {
        None => {
            let endif = SmolStr::new(format!("endif_{k}"));
            code.push(Instruction::fjump(cond_attrs.addr, endif.clone()));
            code.extend(gen_stmt_list(cg, then_branch));
            code.push(Instruction::label(endif));
        }
        Some(else_stmts) => {
            let else_label = SmolStr::new(format!("else_{k}"));
            let endif = SmolStr::new(format!("endif_{k}"));
            code.push(Instruction::fjump(cond_attrs.addr, else_label.clone()));
            code.extend(gen_stmt_list(cg, then_branch));
            code.push(Instruction::ujump(endif.clone()));
            code.push(Instruction::label(else_label));
            code.extend(gen_stmt_list(cg, else_stmts));
            code.push(Instruction::label(endif));
        }
    }
    code
}

fn gen_while<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    cond: &crate::ast::Expr,
    body: &[Stmt],
) -> InstrList {
    let k = cg.counter.new_label(LabelFamily::While);
    let while_label = SmolStr::new(format!("while_{k}"));
    let end_label = SmolStr::new(format!("endWhile_{k}"));

    let mut code = InstrList::new();
    code.push(Instruction::label(while_label.clone()));
    // Re-emitted every iteration — no hoisting, per spec.
    let cond_attrs = gen_expr(cg, cond);
    code.extend(cond_attrs.code);
    code.push(Instruction::fjump(cond_attrs.addr, end_label.clone()));
    code.extend(gen_stmt_list(cg, body));
    code.push(Instruction::ujump(while_label));
    code.push(Instruction::label(end_label));
    code
}

fn gen_return<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    expr: Option<&crate::ast::Expr>,
) -> InstrList {
    match expr {
        Some(e) => {
            let attrs = gen_expr(cg, e);
            let mut code = attrs.code;
            code.push(Instruction::load("_result", attrs.addr));
            code
        }
        None => InstrList::new(),
    }
}

fn gen_read<S: SymbolTable, T: TypeManager>(cg: &mut Codegen<S, T>, lexpr: &LExpr) -> InstrList {
    let attrs = gen_lexpr(cg, lexpr);
    let mut code = attrs.code;
    let ty = lexpr.ty();

    if attrs.is_indexed() {
        let t = cg.counter.new_temp();
        code.push(read_instr(cg, ty, t.clone()));
        code.push(Instruction::xload(attrs.addr, attrs.offs, t));
    } else {
        code.push(read_instr(cg, ty, attrs.addr));
    }
    code
}

fn read_instr<S: SymbolTable, T: TypeManager>(
    cg: &Codegen<S, T>,
    ty: crate::types::TypeId,
    dst: SmolStr,
) -> Instruction {
    if cg.types.is_character(ty) {
        Instruction::readc(dst)
    } else if cg.types.is_float(ty) {
        Instruction::readf(dst)
    } else {
        // integer or boolean
        Instruction::readi(dst)
    }
}

fn gen_write_expr<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    expr: &crate::ast::Expr,
) -> InstrList {
    let attrs = gen_expr(cg, expr);
    let mut code = attrs.code;
    let ty = expr.ty();
    let instr = if cg.types.is_character(ty) {
        Instruction::writec(attrs.addr)
    } else if cg.types.is_float(ty) {
        Instruction::writef(attrs.addr)
    } else {
        Instruction::writei(attrs.addr)
    };
    code.push(instr);
    code
}

/// Scans a string literal's interior (the raw source text, quotes
/// included). Plain characters become `CHLOAD`+`WRITEC` pairs; `\n`
/// becomes `WRITELN` with no characters emitted; `\t`/`\"`/`\\` preserve
/// the two-character escape as the `CHLOAD` immediate; any other escape
/// degrades to its single literal character (§9, open question).
fn gen_write_string<S: SymbolTable, T: TypeManager>(
    cg: &mut Codegen<S, T>,
    text: &str,
) -> InstrList {
    let mut code = InstrList::new();
    let inner = strip_string_quotes(text);
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek().copied() {
                Some('n') => {
                    chars.next();
                    code.push(Instruction::writeln());
                }
                Some(esc @ ('t' | '"' | '\\')) => {
                    chars.next();
                    let t = cg.counter.new_temp();
                    code.push(Instruction::chload(t.clone(), format!("\\{esc}")));
                    code.push(Instruction::writec(t));
                }
                Some(other) => {
                    chars.next();
                    let t = cg.counter.new_temp();
                    code.push(Instruction::chload(t.clone(), other.to_string()));
                    code.push(Instruction::writec(t));
                }
                None => {
                    let t = cg.counter.new_temp();
                    code.push(Instruction::chload(t.clone(), "\\"));
                    code.push(Instruction::writec(t));
                }
            }
        } else {
            let t = cg.counter.new_temp();
            code.push(Instruction::chload(t.clone(), c.to_string()));
            code.push(Instruction::writec(t));
        }
    }
    code
}

fn strip_string_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
