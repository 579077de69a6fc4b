/// Options threaded into `Codegen::new`, following the small
/// options-struct-into-entry-point shape a parser config would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Whether the `× 1` index-scaling multiply (`MUL addr, off, index`) is
    /// skipped when the multiplier is exactly one. Defaults to `false`: the
    /// reference instruction sequences always emit it, kept uniform for a
    /// downstream consumer that may one day see non-unit element sizes.
    elide_unit_multiplier: bool,
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elide_unit_multiplier(&self) -> bool {
        self.elide_unit_multiplier
    }

    pub fn with_elide_unit_multiplier(mut self, elide: bool) -> Self {
        self.elide_unit_multiplier = elide;
        self
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig { elide_unit_multiplier: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_the_unit_multiply() {
        assert!(!CodegenConfig::new().elide_unit_multiplier());
    }

    #[test]
    fn builder_toggles_it() {
        let cfg = CodegenConfig::new().with_elide_unit_multiplier(true);
        assert!(cfg.elide_unit_multiplier());
    }
}
