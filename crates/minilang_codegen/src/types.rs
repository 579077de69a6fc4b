// Type manager contract: the queries the generator needs to pick opcodes
// and compute array layout. A real semantic analyzer supplies its own
// implementation; `BasicTypeManager` is enough to drive tests and the
// example binary.

use ahash::AHashMap;

/// Opaque handle into whatever type table the semantic analyzer built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

pub trait TypeManager {
    fn is_integer(&self, ty: TypeId) -> bool;
    fn is_float(&self, ty: TypeId) -> bool;
    fn is_character(&self, ty: TypeId) -> bool;
    fn is_boolean(&self, ty: TypeId) -> bool;
    fn is_array(&self, ty: TypeId) -> bool;
    fn is_void_function(&self, ty: TypeId) -> bool;
    fn array_element_count(&self, ty: TypeId) -> usize;
    fn cell_size(&self, ty: TypeId) -> usize;
    fn function_parameter_types(&self, ty: TypeId) -> &[TypeId];
}

#[derive(Debug, Clone)]
enum TypeKind {
    Integer,
    Float,
    Character,
    Boolean,
    Array { element: TypeId, count: usize },
    Function { params: Vec<TypeId>, returns: Option<TypeId> },
}

/// A minimal in-memory type table: the four scalar kinds, fixed-size
/// arrays of a registered element type, and function signatures.
#[derive(Debug, Clone, Default)]
pub struct BasicTypeManager {
    kinds: Vec<TypeKind>,
    well_known: AHashMap<&'static str, TypeId>,
}

impl BasicTypeManager {
    pub fn new() -> Self {
        let mut mgr = BasicTypeManager { kinds: Vec::new(), well_known: AHashMap::new() };
        let int = mgr.push(TypeKind::Integer);
        let float = mgr.push(TypeKind::Float);
        let ch = mgr.push(TypeKind::Character);
        let boolean = mgr.push(TypeKind::Boolean);
        mgr.well_known.insert("int", int);
        mgr.well_known.insert("float", float);
        mgr.well_known.insert("char", ch);
        mgr.well_known.insert("bool", boolean);
        mgr
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.kinds.len() as u32);
        self.kinds.push(kind);
        id
    }

    pub fn int(&self) -> TypeId {
        self.well_known["int"]
    }

    pub fn float(&self) -> TypeId {
        self.well_known["float"]
    }

    pub fn char_ty(&self) -> TypeId {
        self.well_known["char"]
    }

    pub fn bool_ty(&self) -> TypeId {
        self.well_known["bool"]
    }

    pub fn array_of(&mut self, element: TypeId, count: usize) -> TypeId {
        self.push(TypeKind::Array { element, count })
    }

    pub fn function_of(&mut self, params: Vec<TypeId>, returns: Option<TypeId>) -> TypeId {
        self.push(TypeKind::Function { params, returns })
    }

    fn kind(&self, ty: TypeId) -> &TypeKind {
        &self.kinds[ty.0 as usize]
    }
}

impl TypeManager for BasicTypeManager {
    fn is_integer(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Integer)
    }

    fn is_float(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Float)
    }

    fn is_character(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Character)
    }

    fn is_boolean(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Boolean)
    }

    fn is_array(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Array { .. })
    }

    fn is_void_function(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), TypeKind::Function { returns: None, .. })
    }

    fn array_element_count(&self, ty: TypeId) -> usize {
        match self.kind(ty) {
            TypeKind::Array { count, .. } => *count,
            _ => 0,
        }
    }

    fn cell_size(&self, ty: TypeId) -> usize {
        match self.kind(ty) {
            TypeKind::Array { element, count } => *count * self.cell_size(*element),
            _ => 1,
        }
    }

    fn function_parameter_types(&self, ty: TypeId) -> &[TypeId] {
        match self.kind(ty) {
            TypeKind::Function { params, .. } => params,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_cell_size_is_one() {
        let mgr = BasicTypeManager::new();
        assert_eq!(mgr.cell_size(mgr.int()), 1);
        assert_eq!(mgr.cell_size(mgr.float()), 1);
    }

    #[test]
    fn array_cell_size_is_element_count() {
        let mut mgr = BasicTypeManager::new();
        let arr = mgr.array_of(mgr.int(), 3);
        assert!(mgr.is_array(arr));
        assert_eq!(mgr.array_element_count(arr), 3);
        assert_eq!(mgr.cell_size(arr), 3);
    }

    #[test]
    fn void_function_is_detected() {
        let mut mgr = BasicTypeManager::new();
        let f = mgr.function_of(vec![mgr.float(), mgr.int()], None);
        assert!(mgr.is_void_function(f));
        assert_eq!(mgr.function_parameter_types(f), &[mgr.float(), mgr.int()]);
    }
}
