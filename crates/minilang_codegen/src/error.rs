// The generator assumes a well-typed, decorated tree (see crate docs). A
// missing decoration or unexpected node variant is a programmer error, not
// a recoverable condition, so the public API returns `Program`/`Subroutine`
// directly rather than `Result`. This gives the abort path a named,
// inspectable shape instead of a bare `panic!("...")` string.

/// Why code generation aborted. Carried by the panic payload so a
/// `std::panic::catch_unwind` caller (a driver reporting a clean internal
/// error) can downcast and inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenBug {
    /// A node decoration (`scope_of`/`type_of`) was missing where the tree
    /// is assumed to already carry it.
    MissingDecoration { node: &'static str },
    /// A tree shape the generator has no visit rule for.
    UnknownNodeVariant { node: &'static str },
    /// Any other internal invariant violation.
    Internal(String),
}

impl std::fmt::Display for CodegenBug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodegenBug::MissingDecoration { node } => {
                write!(f, "codegen bug: missing decoration on {node} node")
            }
            CodegenBug::UnknownNodeVariant { node } => {
                write!(f, "codegen bug: unexpected node variant in {node}")
            }
            CodegenBug::Internal(msg) => write!(f, "codegen bug: {msg}"),
        }
    }
}

impl std::error::Error for CodegenBug {}

/// Logs and aborts. The only way the generator ever fails.
#[cold]
pub fn codegen_bug(kind: CodegenBug) -> ! {
    log::error!("{kind}");
    panic!("{kind}");
}
