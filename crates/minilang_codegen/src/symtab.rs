// Symbol table contract: scope push/pop in strict entry/exit pairs
// matching tree descent, plus the per-name queries the generator needs to
// tell a value-class local from a reference-class parameter.

use crate::types::TypeId;
use ahash::AHashMap;
use smol_str::SmolStr;

/// Opaque scope handle, minted by whatever built the decorated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

pub trait SymbolTable {
    fn push_scope(&mut self, scope: ScopeId);
    fn pop_scope(&mut self);
    fn type_of(&self, name: &str) -> TypeId;
    /// True for value-class locals; false for reference-class parameters,
    /// globals, or anything else whose name denotes a pointer to storage.
    fn is_local(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: AHashMap<SmolStr, (TypeId, bool)>,
}

/// A stack-of-scopes symbol table good enough to drive the generator in
/// tests and the example binary. `declare` is how a real semantic analyzer
/// (or a test fixture) populates a scope before code generation visits it.
#[derive(Debug, Clone, Default)]
pub struct BasicSymbolTable {
    scopes: AHashMap<ScopeId, Scope>,
    stack: Vec<ScopeId>,
}

impl BasicSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, scope: ScopeId, name: impl Into<SmolStr>, ty: TypeId, is_local: bool) {
        self.scopes.entry(scope).or_default().bindings.insert(name.into(), (ty, is_local));
    }

    fn lookup(&self, name: &str) -> (TypeId, bool) {
        for scope in self.stack.iter().rev() {
            if let Some(binding) = self.scopes.get(scope).and_then(|s| s.bindings.get(name)) {
                return *binding;
            }
        }
        crate::error::codegen_bug(crate::error::CodegenBug::Internal(format!(
            "undeclared symbol `{name}`"
        )))
    }
}

impl SymbolTable for BasicSymbolTable {
    fn push_scope(&mut self, scope: ScopeId) {
        self.scopes.entry(scope).or_default();
        self.stack.push(scope);
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    fn type_of(&self, name: &str) -> TypeId {
        self.lookup(name).0
    }

    fn is_local(&self, name: &str) -> bool {
        self.lookup(name).1
    }
}
