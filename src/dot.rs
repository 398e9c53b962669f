//! Graphviz DOT export.

use std::collections::HashSet;
use std::fmt::Write;

use crate::reference::ZddId;
use crate::weights::WeightTable;
use crate::zdd::ZddManager;

impl ZddManager {
    /// Renders the diagram rooted at `f` as a DOT digraph.
    ///
    /// With a weight table, node labels carry the element's weight. Skip
    /// edges are dashed, take edges solid.
    pub fn to_dot(&self, f: ZddId, weights: Option<&WeightTable>) -> String {
        let mut dot = String::new();
        writeln!(dot, "digraph ZDD {{").unwrap();
        writeln!(dot, "  rankdir=TB;").unwrap();
        writeln!(dot, "  node [shape=circle];").unwrap();
        writeln!(dot, "  zero [label=\"⊥\", shape=square];").unwrap();
        writeln!(dot, "  one [label=\"⊤\", shape=square];").unwrap();

        let mut visited = HashSet::new();
        self.collect_dot_nodes(f, &mut visited);

        let mut ids: Vec<ZddId> = visited.iter().copied().collect();
        ids.sort_by_key(|id| id.raw());

        for &id in &ids {
            let node = self.node(id);
            let label = match weights {
                Some(w) => format!("{} ({})", node.var, w.weight(node.var)),
                None => format!("{}", node.var),
            };
            writeln!(dot, "  n{} [label=\"{}\"];", id.raw(), label).unwrap();
        }

        for &id in &ids {
            let node = self.node(id);
            writeln!(dot, "  n{} -> {} [style=dashed];", id.raw(), target(node.lo)).unwrap();
            writeln!(dot, "  n{} -> {};", id.raw(), target(node.hi)).unwrap();
        }

        writeln!(dot, "}}").unwrap();
        dot
    }

    fn collect_dot_nodes(&self, f: ZddId, visited: &mut HashSet<ZddId>) {
        if f.is_terminal() || visited.contains(&f) {
            return;
        }
        visited.insert(f);
        let node = self.node(f);
        self.collect_dot_nodes(node.lo, visited);
        self.collect_dot_nodes(node.hi, visited);
    }
}

fn target(id: ZddId) -> String {
    match id {
        ZddId::ZERO => "zero".to_string(),
        ZddId::ONE => "one".to_string(),
        _ => format!("n{}", id.raw()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_terminals_present() {
        let mgr = ZddManager::new();
        let x1 = mgr.base(1);
        let dot = mgr.to_dot(x1, None);

        assert!(dot.contains("digraph ZDD"));
        assert!(dot.contains("zero"));
        assert!(dot.contains("one"));
        assert!(dot.contains("x1"));
    }

    #[test]
    fn test_dot_with_weights() {
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32, 2]);
        let w = WeightTable::from_weights([2, 3]);
        let dot = mgr.to_dot(ps, Some(&w));

        assert!(dot.contains("x1 (2)"));
        assert!(dot.contains("x2 (3)"));
    }

    #[test]
    fn test_dot_shared_nodes_once() {
        let mgr = ZddManager::new();
        let ps = mgr.powerset(1u32..=3);
        let dot = mgr.to_dot(ps, None);

        // One declaration line per reachable decision node
        let decls = dot.lines().filter(|l| l.contains("[label=\"x")).count();
        assert_eq!(decls, mgr.node_count(ps));
    }
}
