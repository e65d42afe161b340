//! Shared utilities for the neurite-mesh workspace.

/// Smallest `W`-worker capacity that fits `n` items, i.e. `ceil(n / w)`.
///
/// Used to size the `TASK` ownership-set broadcast in §4.2: each worker's
/// array is padded to this length with the `-1` sentinel.
pub fn ceil_div(n: usize, w: usize) -> usize {
    if w == 0 {
        0
    } else {
        (n + w - 1) / w
    }
}

/// Builds a lookup from short names to dense ids, rejecting duplicates.
///
/// Used while loading the configuration document (§6) to resolve connection
/// and I/O bindings that reference neurons by name instead of id.
#[derive(Debug, Default, Clone)]
pub struct NameIndex {
    ids: std::collections::HashMap<String, usize>,
}

impl NameIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` for `id`. Returns `false` if `name` was already
    /// registered for a different id.
    pub fn insert(&mut self, name: &str, id: usize) -> bool {
        match self.ids.get(name) {
            Some(&existing) => existing == id,
            None => {
                self.ids.insert(name.to_string(), id);
                true
            }
        }
    }

    /// Looks up the id registered for `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div_rounds_up() {
        assert_eq!(ceil_div(10, 3), 4);
        assert_eq!(ceil_div(9, 3), 3);
        assert_eq!(ceil_div(1, 1), 1);
    }

    #[test]
    fn ceil_div_zero_workers_is_zero() {
        assert_eq!(ceil_div(10, 0), 0);
    }

    #[test]
    fn name_index_resolves_registered_names() {
        let mut idx = NameIndex::new();
        assert!(idx.insert("A", 0));
        assert!(idx.insert("B", 1));
        assert_eq!(idx.get("A"), Some(0));
        assert_eq!(idx.get("Z"), None);
    }

    #[test]
    fn name_index_rejects_conflicting_duplicate() {
        let mut idx = NameIndex::new();
        assert!(idx.insert("A", 0));
        assert!(!idx.insert("A", 1));
    }
}
