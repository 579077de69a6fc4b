// Fresh-name allocation for one subroutine's worth of temporaries and labels.

use ahash::AHashMap;
use smol_str::SmolStr;

/// A family of labels sharing one counter (e.g. every `if` gets one suffix
/// shared by its `else_k`/`endif_k` pair; every `while` shares `while_k`/
/// `endWhile_k`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelFamily {
    If,
    While,
}

impl LabelFamily {
    fn key(self) -> &'static str {
        match self {
            LabelFamily::If => "if",
            LabelFamily::While => "while",
        }
    }
}

/// Mints `t<k>` temporaries and per-family label suffixes, reset at the
/// start of every subroutine so names stay small and stable.
#[derive(Debug, Default)]
pub struct Counter {
    next_temp: u32,
    next_label: AHashMap<&'static str, u32>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_temp(&mut self) -> SmolStr {
        let k = self.next_temp;
        self.next_temp += 1;
        SmolStr::new(format!("t{k}"))
    }

    /// Returns the next unique suffix for `family`. Callers compose the
    /// actual label text (`while_{k}`, `endWhile_{k}`, ...) themselves so
    /// that a single suffix can back several related label names.
    pub fn new_label(&mut self, family: LabelFamily) -> u32 {
        let entry = self.next_label.entry(family.key()).or_insert(0);
        let k = *entry;
        *entry += 1;
        k
    }

    pub fn reset(&mut self) {
        self.next_temp = 0;
        self.next_label.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temps_are_sequential_and_reset() {
        let mut c = Counter::new();
        assert_eq!(c.new_temp(), "t0");
        assert_eq!(c.new_temp(), "t1");
        c.reset();
        assert_eq!(c.new_temp(), "t0");
    }

    #[test]
    fn label_families_count_independently() {
        let mut c = Counter::new();
        assert_eq!(c.new_label(LabelFamily::If), 0);
        assert_eq!(c.new_label(LabelFamily::While), 0);
        assert_eq!(c.new_label(LabelFamily::If), 1);
        assert_eq!(c.new_label(LabelFamily::While), 1);
    }

    #[test]
    fn reset_zeroes_every_family() {
        let mut c = Counter::new();
        c.new_label(LabelFamily::If);
        c.new_label(LabelFamily::While);
        c.reset();
        assert_eq!(c.new_label(LabelFamily::If), 0);
        assert_eq!(c.new_label(LabelFamily::While), 0);
    }
}
