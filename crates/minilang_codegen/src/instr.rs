// TAC instruction shapes and their pure constructors.
//
// Every opcode below gets one constructor on `Instruction` taking exactly
// the operands it needs. Constructors validate nothing beyond arity — a
// well-typed decorated tree is assumed upstream (see `error`).

use smol_str::SmolStr;

/// One instruction in the three-address code stream. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    // -- scalar load/store --
    Load { dst: SmolStr, src: SmolStr },
    ILoad { dst: SmolStr, imm: SmolStr },
    FLoad { dst: SmolStr, imm: SmolStr },
    ChLoad { dst: SmolStr, imm: SmolStr },
    ALoad { dst: SmolStr, sym: SmolStr },
    LoadX { dst: SmolStr, base: SmolStr, off: SmolStr },
    XLoad { base: SmolStr, off: SmolStr, src: SmolStr },

    // -- integer arithmetic --
    Add { dst: SmolStr, a: SmolStr, b: SmolStr },
    Sub { dst: SmolStr, a: SmolStr, b: SmolStr },
    Mul { dst: SmolStr, a: SmolStr, b: SmolStr },
    Div { dst: SmolStr, a: SmolStr, b: SmolStr },
    Neg { dst: SmolStr, a: SmolStr },

    // -- float arithmetic --
    FAdd { dst: SmolStr, a: SmolStr, b: SmolStr },
    FSub { dst: SmolStr, a: SmolStr, b: SmolStr },
    FMul { dst: SmolStr, a: SmolStr, b: SmolStr },
    FDiv { dst: SmolStr, a: SmolStr, b: SmolStr },
    FNeg { dst: SmolStr, a: SmolStr },

    // -- coercion --
    Float { dst: SmolStr, src: SmolStr },

    // -- logical --
    And { dst: SmolStr, a: SmolStr, b: SmolStr },
    Or { dst: SmolStr, a: SmolStr, b: SmolStr },
    Not { dst: SmolStr, a: SmolStr },

    // -- integer comparison --
    Eq { dst: SmolStr, a: SmolStr, b: SmolStr },
    Le { dst: SmolStr, a: SmolStr, b: SmolStr },
    Lt { dst: SmolStr, a: SmolStr, b: SmolStr },

    // -- float comparison --
    FEq { dst: SmolStr, a: SmolStr, b: SmolStr },
    FLe { dst: SmolStr, a: SmolStr, b: SmolStr },
    FLt { dst: SmolStr, a: SmolStr, b: SmolStr },

    // -- control flow --
    Label(SmolStr),
    UJump(SmolStr),
    FJump { cond: SmolStr, label: SmolStr },

    // -- calls --
    Push(Option<SmolStr>),
    Pop(Option<SmolStr>),
    Call(SmolStr),
    Return,

    // -- I/O --
    ReadI(SmolStr),
    ReadF(SmolStr),
    ReadC(SmolStr),
    WriteI(SmolStr),
    WriteF(SmolStr),
    WriteC(SmolStr),
    WriteLn,
}

impl Instruction {
    pub fn load(dst: impl Into<SmolStr>, src: impl Into<SmolStr>) -> Self {
        Instruction::Load { dst: dst.into(), src: src.into() }
    }

    pub fn iload(dst: impl Into<SmolStr>, imm: impl Into<SmolStr>) -> Self {
        Instruction::ILoad { dst: dst.into(), imm: imm.into() }
    }

    pub fn fload(dst: impl Into<SmolStr>, imm: impl Into<SmolStr>) -> Self {
        Instruction::FLoad { dst: dst.into(), imm: imm.into() }
    }

    pub fn chload(dst: impl Into<SmolStr>, imm: impl Into<SmolStr>) -> Self {
        Instruction::ChLoad { dst: dst.into(), imm: imm.into() }
    }

    pub fn aload(dst: impl Into<SmolStr>, sym: impl Into<SmolStr>) -> Self {
        Instruction::ALoad { dst: dst.into(), sym: sym.into() }
    }

    pub fn loadx(dst: impl Into<SmolStr>, base: impl Into<SmolStr>, off: impl Into<SmolStr>) -> Self {
        Instruction::LoadX { dst: dst.into(), base: base.into(), off: off.into() }
    }

    pub fn xload(base: impl Into<SmolStr>, off: impl Into<SmolStr>, src: impl Into<SmolStr>) -> Self {
        Instruction::XLoad { base: base.into(), off: off.into(), src: src.into() }
    }

    pub fn add(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Add { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn sub(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Sub { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn mul(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Mul { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn div(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Div { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn neg(dst: impl Into<SmolStr>, a: impl Into<SmolStr>) -> Self {
        Instruction::Neg { dst: dst.into(), a: a.into() }
    }

    pub fn fadd(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FAdd { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn fsub(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FSub { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn fmul(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FMul { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn fdiv(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FDiv { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn fneg(dst: impl Into<SmolStr>, a: impl Into<SmolStr>) -> Self {
        Instruction::FNeg { dst: dst.into(), a: a.into() }
    }

    pub fn float(dst: impl Into<SmolStr>, src: impl Into<SmolStr>) -> Self {
        Instruction::Float { dst: dst.into(), src: src.into() }
    }

    pub fn and(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::And { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn or(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Or { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn not(dst: impl Into<SmolStr>, a: impl Into<SmolStr>) -> Self {
        Instruction::Not { dst: dst.into(), a: a.into() }
    }

    pub fn eq(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Eq { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn le(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Le { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn lt(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::Lt { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn feq(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FEq { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn fle(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FLe { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn flt(dst: impl Into<SmolStr>, a: impl Into<SmolStr>, b: impl Into<SmolStr>) -> Self {
        Instruction::FLt { dst: dst.into(), a: a.into(), b: b.into() }
    }

    pub fn label(name: impl Into<SmolStr>) -> Self {
        Instruction::Label(name.into())
    }

    pub fn ujump(label: impl Into<SmolStr>) -> Self {
        Instruction::UJump(label.into())
    }

    pub fn fjump(cond: impl Into<SmolStr>, label: impl Into<SmolStr>) -> Self {
        Instruction::FJump { cond: cond.into(), label: label.into() }
    }

    /// Reserve-slot form (no argument).
    pub fn push() -> Self {
        Instruction::Push(None)
    }

    /// Push-value form.
    pub fn push_val(src: impl Into<SmolStr>) -> Self {
        Instruction::Push(Some(src.into()))
    }

    /// Drop form (no argument).
    pub fn pop() -> Self {
        Instruction::Pop(None)
    }

    /// Pop-into form.
    pub fn pop_into(dst: impl Into<SmolStr>) -> Self {
        Instruction::Pop(Some(dst.into()))
    }

    pub fn call(name: impl Into<SmolStr>) -> Self {
        Instruction::Call(name.into())
    }

    pub fn ret() -> Self {
        Instruction::Return
    }

    pub fn readi(dst: impl Into<SmolStr>) -> Self {
        Instruction::ReadI(dst.into())
    }

    pub fn readf(dst: impl Into<SmolStr>) -> Self {
        Instruction::ReadF(dst.into())
    }

    pub fn readc(dst: impl Into<SmolStr>) -> Self {
        Instruction::ReadC(dst.into())
    }

    pub fn writei(src: impl Into<SmolStr>) -> Self {
        Instruction::WriteI(src.into())
    }

    pub fn writef(src: impl Into<SmolStr>) -> Self {
        Instruction::WriteF(src.into())
    }

    pub fn writec(src: impl Into<SmolStr>) -> Self {
        Instruction::WriteC(src.into())
    }

    pub fn writeln() -> Self {
        Instruction::WriteLn
    }

    /// True for the `LABEL` pseudo-instruction, used by property tests that
    /// walk a body looking for label definitions vs. jump targets.
    pub fn is_label(&self) -> bool {
        matches!(self, Instruction::Label(_))
    }

    /// The label name this instruction jumps to, if it is a jump.
    pub fn jump_target(&self) -> Option<&SmolStr> {
        match self {
            Instruction::UJump(l) => Some(l),
            Instruction::FJump { label, .. } => Some(label),
            _ => None,
        }
    }
}
