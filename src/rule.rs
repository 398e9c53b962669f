//! The traversal-rule seam: combining a diagram with a caller-supplied rule.
//!
//! A [`SubsetRule`] describes a family implicitly, level by level. Levels
//! count *down*: the root sits at level `n` (the universe size) and level 1
//! decides the last element, so level `l` decides element `n - l + 1` under
//! the manager's allocation order. At each edge the rule answers with a
//! [`Step`]: kill the edge, accept the completed path, or descend.
//!
//! [`ZddManager::subset`] intersects an existing diagram with a rule. The
//! driver is single-threaded and depth-first, evaluates the skip edge before
//! the take edge of every product node, and memoizes product nodes by
//! `(node id, rule level)`, so each product edge is evaluated exactly once
//! in a fixed order. Stateful rules (notably random pruning) rely on that
//! contract for seeded reproducibility.

use std::collections::HashMap;

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Outcome of following one edge of a rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// Kill this edge: nothing reachable through it is a member.
    Prune,
    /// The path so far is a complete member; no elements remain to decide.
    Accept,
    /// Continue at the given level (`1..=current level - 1`).
    Descend(u32),
}

/// A level-by-level description of a family, consumed by [`ZddManager::subset`].
///
/// Implementations may be stateful; the driver calls `child` exactly once
/// per product edge, in a fixed depth-first order (skip before take).
pub trait SubsetRule {
    /// The root level, i.e. the universe size `n`.
    fn root(&mut self) -> u32;

    /// Follows one edge from a node at `level`.
    ///
    /// `take` is false for the skip edge and true for the take edge.
    fn child(&mut self, level: u32, take: bool) -> Step;
}

impl ZddManager {
    /// Intersects `f` with the family described by `rule`.
    ///
    /// The result comes out of [`get_node`](ZddManager::get_node), hence it
    /// is reduced and canonical; an empty result is `ZddId::ZERO`, which is
    /// a valid diagram, not an error.
    ///
    /// # Panics
    ///
    /// Panics if the rule's root level exceeds the allocated universe.
    pub fn subset<R: SubsetRule>(&self, f: ZddId, rule: &mut R) -> ZddId {
        let n = rule.root();
        assert!(
            n as usize <= self.num_vars(),
            "rule root level {} exceeds universe size {}",
            n,
            self.num_vars()
        );

        if n == 0 {
            // Degenerate rule: only the empty set can be a member
            return if self.contains_empty(f) { ZddId::ONE } else { ZddId::ZERO };
        }

        let mut memo = HashMap::new();
        let result = self.subset_rec(f, n, n, rule, &mut memo);
        log::debug!(
            "subset: {} product nodes, root {} -> {}",
            memo.len(),
            f,
            result
        );
        result
    }

    fn subset_rec<R: SubsetRule>(
        &self,
        f: ZddId,
        level: u32,
        n: u32,
        rule: &mut R,
        memo: &mut HashMap<(ZddId, u32), ZddId>,
    ) -> ZddId {
        if f.is_zero() {
            return ZddId::ZERO;
        }

        let key = (f, level);
        if let Some(&result) = memo.get(&key) {
            return result;
        }

        // Element decided at this rule level
        let var = Var::new(n - level + 1);
        let var_level = self.level(var);

        // If the rule skipped over elements the diagram still branches on,
        // those elements are forced absent: follow the skip chain down.
        let mut g = f;
        while !g.is_terminal() && self.level(self.node(g).var) < var_level {
            g = self.node(g).lo;
        }

        // Split on `var`. A diagram that does not branch here has an empty
        // take branch (zero-suppression).
        let (g_lo, g_hi) = if !g.is_terminal() && self.node(g).var == var {
            let node = self.node(g);
            (node.lo, node.hi)
        } else {
            (g, ZddId::ZERO)
        };

        // Skip edge first, then take edge. Edges into ⊥ do not exist in the
        // product and are not offered to the rule.
        let lo = self.subset_edge(g_lo, level, false, n, rule, memo);
        let hi = self.subset_edge(g_hi, level, true, n, rule, memo);

        let result = self.get_node(var, lo, hi);
        memo.insert(key, result);
        result
    }

    fn subset_edge<R: SubsetRule>(
        &self,
        f_child: ZddId,
        level: u32,
        take: bool,
        n: u32,
        rule: &mut R,
        memo: &mut HashMap<(ZddId, u32), ZddId>,
    ) -> ZddId {
        if f_child.is_zero() {
            return ZddId::ZERO;
        }
        match rule.child(level, take) {
            Step::Prune => ZddId::ZERO,
            Step::Accept => {
                // Every element is decided; the diagram side must be done too
                if self.contains_empty(f_child) {
                    ZddId::ONE
                } else {
                    ZddId::ZERO
                }
            }
            Step::Descend(next) => {
                debug_assert!(next >= 1 && next < level, "rule must descend strictly");
                self.subset_rec(f_child, next, n, rule, memo)
            }
        }
    }
}
