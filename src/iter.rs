//! Unranked enumeration of the member sets of a family.

use crate::reference::ZddId;
use crate::types::Var;
use crate::zdd::ZddManager;

/// Depth-first iterator yielding every member set of a family.
///
/// For ranked (descending-value) enumeration see
/// [`ZddManager::iter_ranked`](crate::zdd::ZddManager::iter_ranked).
pub struct SetIterator<'a> {
    mgr: &'a ZddManager,
    /// Stack of (node, partial set, take branch visited).
    stack: Vec<(ZddId, Vec<Var>, bool)>,
}

impl<'a> SetIterator<'a> {
    pub fn new(mgr: &'a ZddManager, root: ZddId) -> Self {
        let mut iter = Self { mgr, stack: Vec::new() };
        if !root.is_zero() {
            iter.stack.push((root, Vec::new(), false));
        }
        iter
    }
}

impl Iterator for SetIterator<'_> {
    type Item = Vec<Var>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, current_set, visited_hi)) = self.stack.pop() {
            if id.is_zero() {
                continue;
            }

            if id.is_one() {
                return Some(current_set);
            }

            let node = self.mgr.node(id);

            if !visited_hi {
                // Revisit later for the take branch, descend skip first
                self.stack.push((id, current_set.clone(), true));
                self.stack.push((node.lo, current_set, false));
            } else {
                let mut hi_set = current_set;
                hi_set.push(node.var);
                self.stack.push((node.hi, hi_set, false));
            }
        }
        None
    }
}

impl ZddManager {
    /// Iterates over all member sets of `f`, in no particular value order.
    ///
    /// # Example
    ///
    /// ```
    /// use zdd_stats::zdd::ZddManager;
    ///
    /// let mgr = ZddManager::new();
    /// let ps = mgr.powerset([1u32, 2]);
    ///
    /// let sets: Vec<_> = mgr.iter_sets(ps).collect();
    /// assert_eq!(sets.len(), 4);
    /// ```
    pub fn iter_sets(&self, f: ZddId) -> SetIterator<'_> {
        SetIterator::new(self, f)
    }

    /// Collects all member sets into a vector.
    pub fn collect_sets(&self, f: ZddId) -> Vec<Vec<Var>> {
        self.iter_sets(f).collect()
    }
}
