//! Tent dependency table.

use smallvec::SmallVec;
use tents_core::TentId;

/// Index-based dependency DAG over the tents of one slab.
///
/// `depends_on(i)` lists the tents that must finish before tent `i`
/// starts. Tents are only ever added after all their dependencies, so
/// pitch order is a topological order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyTable {
    deps: Vec<SmallVec<[TentId; 8]>>,
    dependents: Vec<SmallVec<[TentId; 8]>>,
}

impl DependencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tent with the given dependencies and return its id.
    ///
    /// Dependencies are sorted and deduplicated. Every dependency must
    /// already be in the table.
    pub(crate) fn push(&mut self, mut deps: SmallVec<[TentId; 8]>) -> TentId {
        let id = TentId(self.deps.len() as u32);
        deps.sort_unstable();
        deps.dedup();
        for &d in &deps {
            debug_assert!(d < id, "dependency {d} added after tent {id}");
            self.dependents[d.index()].push(id);
        }
        self.deps.push(deps);
        self.dependents.push(SmallVec::new());
        id
    }

    /// Number of tents.
    pub fn len(&self) -> usize {
        self.deps.len()
    }

    /// Whether the table has no tents.
    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// Total number of dependency edges.
    pub fn n_edges(&self) -> usize {
        self.deps.iter().map(|d| d.len()).sum()
    }

    /// Tents that `tent` waits for.
    pub fn depends_on(&self, tent: TentId) -> &[TentId] {
        &self.deps[tent.index()]
    }

    /// Tents that wait for `tent`.
    pub fn dependents(&self, tent: TentId) -> &[TentId] {
        &self.dependents[tent.index()]
    }

    /// Kahn's algorithm: `true` if every tent can be scheduled.
    pub fn is_acyclic(&self) -> bool {
        let mut remaining: Vec<usize> = self.deps.iter().map(|d| d.len()).collect();
        let mut stack: Vec<usize> = (0..remaining.len()).filter(|&i| remaining[i] == 0).collect();
        let mut seen = 0;
        while let Some(i) = stack.pop() {
            seen += 1;
            for &d in &self.dependents[i] {
                remaining[d.index()] -= 1;
                if remaining[d.index()] == 0 {
                    stack.push(d.index());
                }
            }
        }
        seen == self.deps.len()
    }

    /// Tents without dependencies.
    pub fn roots(&self) -> impl Iterator<Item = TentId> + '_ {
        self.deps
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_empty())
            .map(|(i, _)| TentId(i as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn push_links_both_directions() {
        let mut t = DependencyTable::new();
        let a = t.push(SmallVec::new());
        let b = t.push(SmallVec::new());
        let c = t.push(smallvec![b, a, a]);
        assert_eq!(t.depends_on(c), &[a, b]);
        assert_eq!(t.dependents(a), &[c]);
        assert_eq!(t.n_edges(), 2);
        assert_eq!(t.roots().collect::<Vec<_>>(), vec![a, b]);
        assert!(t.is_acyclic());
    }

    #[test]
    fn empty_table_is_acyclic() {
        let t = DependencyTable::new();
        assert!(t.is_empty());
        assert!(t.is_acyclic());
    }
}
