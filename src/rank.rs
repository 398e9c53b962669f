//! Best-first enumeration of family members in descending value order.
//!
//! Preprocessing computes `best[node]`, the exact maximum value of any
//! accept-reaching completion below each node, in one memoized bottom-up
//! pass. The enumerator then grows partial paths in a max-heap frontier
//! scored by `accumulated value + best[node]`. Because the bound is exact
//! (not a heuristic), the i-th completed path popped from the frontier is
//! exactly the i-th largest-value member.
//!
//! Ties in score expand the take-derived entry before the skip-derived one,
//! which pins a canonical output order across runs.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::reference::ZddId;
use crate::types::Var;
use crate::weights::WeightTable;
use crate::zdd::ZddManager;

/// One emitted member: its total value and its elements, in level order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub value: i64,
    pub elements: Vec<Var>,
}

/// A partial decision path awaiting expansion.
///
/// `score = value + best[node]` is the exact best total achievable by any
/// completion of this path.
#[derive(Debug, Clone)]
struct Entry {
    score: i64,
    /// Tie-break: entries reached via a take edge expand first.
    from_take: bool,
    node: ZddId,
    value: i64,
    elements: Vec<Var>,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.from_take == other.from_take
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher score first; on ties, take-derived first
        self.score
            .cmp(&other.score)
            .then(self.from_take.cmp(&other.from_take))
    }
}

/// Lazy descending-value enumerator over the members of a family.
///
/// Created by [`ZddManager::iter_ranked`]. Drive it either through the
/// explicit [`advance`](WeightedIterator::advance) /
/// [`current`](WeightedIterator::current) protocol or as a standard
/// [`Iterator`]. Exhaustion is a normal outcome: `advance` returns false
/// and `current` returns `None` from then on.
pub struct WeightedIterator<'a> {
    mgr: &'a ZddManager,
    weights: &'a WeightTable,
    /// Exact best completion value per node; reject-blocked nodes absent.
    best: HashMap<ZddId, i64>,
    frontier: BinaryHeap<Entry>,
    current: Option<Solution>,
    emitted: u64,
}

impl<'a> WeightedIterator<'a> {
    pub(crate) fn new(mgr: &'a ZddManager, root: ZddId, weights: &'a WeightTable) -> Self {
        assert!(
            weights.universe() >= mgr.num_vars(),
            "weight table covers {} elements, universe has {}",
            weights.universe(),
            mgr.num_vars()
        );

        let mut best = HashMap::new();
        let root_best = best_value(mgr, root, weights, &mut best);

        let mut frontier = BinaryHeap::new();
        if let Some(bound) = root_best {
            frontier.push(Entry {
                score: bound,
                from_take: false,
                node: root,
                value: 0,
                elements: Vec::new(),
            });
        }

        log::debug!("ranked enumeration: {} nodes bounded", best.len());

        Self {
            mgr,
            weights,
            best,
            frontier,
            current: None,
            emitted: 0,
        }
    }

    /// Moves to the next-ranked member. Returns false once the family is
    /// exhausted; further calls keep returning false.
    pub fn advance(&mut self) -> bool {
        while let Some(entry) = self.frontier.pop() {
            if entry.node.is_one() {
                // Complete path: this is the next-largest member
                self.current = Some(Solution {
                    value: entry.value,
                    elements: entry.elements,
                });
                self.emitted += 1;
                return true;
            }

            let node = self.mgr.node(entry.node);

            // Take successor: value grows by this element's weight
            if let Some(&bound) = self.best.get(&node.hi) {
                let weight = self.weights.weight(node.var);
                let mut elements = entry.elements.clone();
                elements.push(node.var);
                self.frontier.push(Entry {
                    score: entry.value + weight + bound,
                    from_take: true,
                    node: node.hi,
                    value: entry.value + weight,
                    elements,
                });
            }

            // Skip successor: value unchanged
            if let Some(&bound) = self.best.get(&node.lo) {
                self.frontier.push(Entry {
                    score: entry.value + bound,
                    from_take: false,
                    node: node.lo,
                    value: entry.value,
                    elements: entry.elements,
                });
            }
        }

        self.current = None;
        false
    }

    /// The most recently emitted member, or `None` before the first
    /// successful advance and after exhaustion.
    pub fn current(&self) -> Option<&Solution> {
        self.current.as_ref()
    }

    /// Value of the most recently emitted member.
    pub fn current_value(&self) -> Option<i64> {
        self.current.as_ref().map(|s| s.value)
    }

    /// Number of members emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Iterator for WeightedIterator<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.advance() {
            self.current.clone()
        } else {
            None
        }
    }
}

/// Maximum value of any accept-reaching completion below `f`.
///
/// `None` means no accept terminal is reachable (only through ⊥). Memoized
/// by node identity; each node is computed once per enumerator.
fn best_value(
    mgr: &ZddManager,
    f: ZddId,
    weights: &WeightTable,
    memo: &mut HashMap<ZddId, i64>,
) -> Option<i64> {
    if f.is_zero() {
        return None;
    }
    if f.is_one() {
        memo.insert(f, 0);
        return Some(0);
    }

    if let Some(&cached) = memo.get(&f) {
        return Some(cached);
    }

    let node = mgr.node(f);
    let skip = best_value(mgr, node.lo, weights, memo);
    let take = best_value(mgr, node.hi, weights, memo).map(|b| b + weights.weight(node.var));

    // In a ZDD hi is never ⊥, so the take chain always reaches ⊤ and
    // `take` is Some; only the skip side can be blocked.
    let best = match (skip, take) {
        (Some(s), Some(t)) => s.max(t),
        (Some(s), None) => s,
        (None, Some(t)) => t,
        (None, None) => return None,
    };

    memo.insert(f, best);
    Some(best)
}

impl ZddManager {
    /// Enumerates the members of `f` in non-increasing value order.
    ///
    /// The diagram and weight table must stay unchanged for the iterator's
    /// lifetime (the borrow checker enforces the table; do not grow the
    /// universe mid-enumeration).
    pub fn iter_ranked<'a>(&'a self, f: ZddId, weights: &'a WeightTable) -> WeightedIterator<'a> {
        WeightedIterator::new(self, f, weights)
    }
}
