// End-to-end fixture tests for the §8 sample programs (S1-S6), each driving
// `Codegen::generate_program` through a hand-built decorated tree and
// asserting on the resulting instruction stream, up to fresh-name renaming
// where the spec allows it.

use super::Codegen;
use crate::ast::*;
use crate::config::CodegenConfig;
use crate::instr::Instruction;
use crate::symtab::{BasicSymbolTable, ScopeId};
use crate::types::{BasicTypeManager, TypeId};

fn one_function(name: &str, decls: Vec<Decl>, params: Vec<Param>, ty: TypeId, body: Vec<Stmt>) -> Program {
    Program {
        scope: ScopeId(0),
        functions: vec![Function { name: name.into(), scope: ScopeId(1), ty, params, decls, body }],
    }
}

/// S1: `function f() { x = 3; }` with `x:int` local.
#[test]
fn s1_simple_local_assignment() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "x", int, true);

    let prog = one_function(
        "f",
        vec![Decl { name: "x".into(), ty: int }],
        vec![],
        void_fn,
        vec![Stmt::Assign {
            lhs: LExpr::Ident { name: "x".into(), ty: int },
            rhs: Expr::Literal { value: Literal::Int("3".into()), ty: int },
        }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);

    let f = &out.subroutines[0];
    assert_eq!(f.name, "f");
    assert_eq!(f.locals.len(), 1);
    assert_eq!(f.locals[0].name, "x");
    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::iload("t0", "3"),
            Instruction::load("x", "t0"),
            Instruction::ret(),
        ]
    );
}

/// S2: `if x < 0 then y = 1; else y = 2; endif`.
#[test]
fn s2_if_else() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "x", int, true);
    symtab.declare(ScopeId(1), "y", int, true);

    let cond = Expr::Binary {
        op: BinOp::Lt,
        lhs: Box::new(Expr::Ident { name: "x".into(), ty: int }),
        rhs: Box::new(Expr::Literal { value: Literal::Int("0".into()), ty: int }),
        ty: types.bool_ty(),
    };
    let then_branch = vec![Stmt::Assign {
        lhs: LExpr::Ident { name: "y".into(), ty: int },
        rhs: Expr::Literal { value: Literal::Int("1".into()), ty: int },
    }];
    let else_branch = vec![Stmt::Assign {
        lhs: LExpr::Ident { name: "y".into(), ty: int },
        rhs: Expr::Literal { value: Literal::Int("2".into()), ty: int },
    }];

    let prog = one_function(
        "f",
        vec![],
        vec![],
        void_fn,
        vec![Stmt::If { cond, then_branch, else_branch: Some(else_branch) }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let f = &out.subroutines[0];

    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::iload("t0", "0"),
            Instruction::lt("t1", "x", "t0"),
            Instruction::fjump("t1", "else_0"),
            Instruction::iload("t2", "1"),
            Instruction::load("y", "t2"),
            Instruction::ujump("endif_0"),
            Instruction::label("else_0"),
            Instruction::iload("t3", "2"),
            Instruction::load("y", "t3"),
            Instruction::label("endif_0"),
            Instruction::ret(),
        ]
    );
}

/// S3: `while i < n do i = i+1; endwhile`.
#[test]
fn s3_while_loop() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "i", int, true);
    symtab.declare(ScopeId(1), "n", int, true);

    let cond = Expr::Binary {
        op: BinOp::Lt,
        lhs: Box::new(Expr::Ident { name: "i".into(), ty: int }),
        rhs: Box::new(Expr::Ident { name: "n".into(), ty: int }),
        ty: types.bool_ty(),
    };
    let body = vec![Stmt::Assign {
        lhs: LExpr::Ident { name: "i".into(), ty: int },
        rhs: Expr::Binary {
            op: BinOp::Add,
            lhs: Box::new(Expr::Ident { name: "i".into(), ty: int }),
            rhs: Box::new(Expr::Literal { value: Literal::Int("1".into()), ty: int }),
            ty: int,
        },
    }];

    let prog = one_function("f", vec![], vec![], void_fn, vec![Stmt::While { cond, body }]);

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let f = &out.subroutines[0];

    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::label("while_0"),
            Instruction::lt("t0", "i", "n"),
            Instruction::fjump("t0", "endWhile_0"),
            Instruction::iload("t1", "1"),
            Instruction::add("t2", "i", "t1"),
            Instruction::load("i", "t2"),
            Instruction::ujump("while_0"),
            Instruction::label("endWhile_0"),
            Instruction::ret(),
        ]
    );
}

/// S4: `x = a + 1.0` where `x,a:float`.
#[test]
fn s4_float_coercion() {
    let mut types = BasicTypeManager::new();
    let float = types.float();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "x", float, true);
    symtab.declare(ScopeId(1), "a", types.int(), true);

    let rhs = Expr::Binary {
        op: BinOp::Add,
        lhs: Box::new(Expr::Ident { name: "a".into(), ty: types.int() }),
        rhs: Box::new(Expr::Literal { value: Literal::Float("1.0".into()), ty: float }),
        ty: float,
    };
    let prog = one_function(
        "f",
        vec![],
        vec![],
        void_fn,
        vec![Stmt::Assign { lhs: LExpr::Ident { name: "x".into(), ty: float }, rhs }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let f = &out.subroutines[0];

    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::float("t0", "a"),
            Instruction::fload("t1", "1.0"),
            Instruction::fadd("t2", "t0", "t1"),
            Instruction::load("x", "t2"),
            Instruction::ret(),
        ]
    );
}

/// S5: `g(a, 3)` where `g` takes `(float, int)` and `a:int`; `g` is void.
#[test]
fn s5_void_call_coerces_first_arg() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let float = types.float();
    let g_ty = types.function_of(vec![float, int], None);
    let f_ty = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "a", int, true);

    let call = CallExpr {
        callee: "g".into(),
        args: vec![
            Expr::Ident { name: "a".into(), ty: int },
            Expr::Literal { value: Literal::Int("3".into()), ty: int },
        ],
        fn_ty: g_ty,
        result_ty: int,
    };
    let prog = one_function("f", vec![], vec![], f_ty, vec![Stmt::Call(call)]);

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let f = &out.subroutines[0];

    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::float("t0", "a"),
            Instruction::push_val("t0"),
            Instruction::iload("t1", "3"),
            Instruction::push_val("t1"),
            Instruction::call("g"),
            Instruction::pop(),
            Instruction::pop(),
            Instruction::ret(),
        ]
    );
}

/// S6: `b = a` where both are locals, arrays of size 3.
#[test]
fn s6_array_assignment_loop() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let arr = types.array_of(int, 3);
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "a", arr, true);
    symtab.declare(ScopeId(1), "b", arr, true);

    let prog = one_function(
        "f",
        vec![],
        vec![],
        void_fn,
        vec![Stmt::Assign {
            lhs: LExpr::Ident { name: "b".into(), ty: arr },
            rhs: Expr::Ident { name: "a".into(), ty: arr },
        }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let f = &out.subroutines[0];

    assert_eq!(
        f.body.as_slice(),
        &[
            Instruction::iload("t0", "0"),
            Instruction::iload("t1", "1"),
            Instruction::iload("t2", "3"),
            Instruction::iload("t3", "1"),
            Instruction::label("while_0"),
            Instruction::lt("t4", "t0", "t2"),
            Instruction::fjump("t4", "endwhile_0"),
            Instruction::mul("t5", "t3", "t0"),
            Instruction::loadx("t6", "a", "t5"),
            Instruction::xload("b", "t5", "t6"),
            Instruction::add("t0", "t0", "t1"),
            Instruction::ujump("while_0"),
            Instruction::label("endwhile_0"),
            Instruction::ret(),
        ]
    );
}

/// Testable property 1: every emitted body ends in exactly one `RETURN`.
#[test]
fn property_body_ends_with_single_return() {
    let mut types = BasicTypeManager::new();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    let prog = one_function("f", vec![], vec![], void_fn, vec![]);
    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);

    let body = out.subroutines[0].body.as_slice();
    let returns = body.iter().filter(|i| matches!(i, Instruction::Return)).count();
    assert_eq!(returns, 1);
    assert!(matches!(body.last(), Some(Instruction::Return)));
}

/// Testable property 2: every jump target is defined exactly once.
#[test]
fn property_every_jump_target_defined_once() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "x", int, true);

    let cond = Expr::Ident { name: "x".into(), ty: types.bool_ty() };
    let then_branch = vec![];
    let else_branch = vec![];
    let prog = one_function(
        "f",
        vec![],
        vec![],
        void_fn,
        vec![Stmt::If { cond, then_branch, else_branch: Some(else_branch) }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let body = out.subroutines[0].body.as_slice();

    for instr in body {
        if let Some(target) = instr.jump_target() {
            let defs = body.iter().filter(|i| i.is_label() && matches!(i, Instruction::Label(l) if l == target)).count();
            assert_eq!(defs, 1, "label {target} must be defined exactly once");
        }
    }
}

/// Testable property 6: a value-returning call has one leading zero-arg
/// PUSH and one trailing POP-into-temp, around the argument-push block.
#[test]
fn property_value_call_brackets_args_with_push_pop() {
    let mut types = BasicTypeManager::new();
    let int = types.int();
    let h_ty = types.function_of(vec![int], Some(int));
    let void_fn = types.function_of(vec![], None);
    let mut symtab = BasicSymbolTable::new();
    symtab.declare(ScopeId(1), "x", int, true);

    let call = CallExpr {
        callee: "h".into(),
        args: vec![Expr::Ident { name: "x".into(), ty: int }],
        fn_ty: h_ty,
        result_ty: int,
    };
    let prog = one_function(
        "f",
        vec![],
        vec![],
        void_fn,
        vec![Stmt::Assign {
            lhs: LExpr::Ident { name: "x".into(), ty: int },
            rhs: Expr::Call(call),
        }],
    );

    let mut cg = Codegen::new(&mut symtab, &types, CodegenConfig::new());
    let out = cg.generate_program(&prog);
    let body = out.subroutines[0].body.as_slice();

    assert_eq!(body[0], Instruction::push());
    assert_eq!(body[1], Instruction::push_val("x"));
    assert_eq!(body[2], Instruction::call("h"));
    assert_eq!(body[3], Instruction::pop());
    assert!(matches!(body[4], Instruction::Pop(Some(_))));
}
