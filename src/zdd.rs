//! The ZDD manager: shared node storage and family construction.
//!
//! A ZDD encodes a family of subsets of a finite universe as a shared DAG
//! with one skip/take edge pair per element. The manager hash-conses nodes
//! and applies the zero-suppression rule, so every family has exactly one
//! representation and node identity can key downstream memoization.
//!
//! # Quick Start
//!
//! ```
//! use zdd_stats::zdd::ZddManager;
//! use num_bigint::BigUint;
//!
//! let mgr = ZddManager::new();
//!
//! let x1 = mgr.base(1); // {{1}}
//! let x2 = mgr.base(2); // {{2}}
//!
//! let union = mgr.union(x1, x2);  // {{1}, {2}}
//! let joined = mgr.join(x1, x2);  // {{1, 2}}
//!
//! assert_eq!(mgr.count(union), BigUint::from(2u32));
//! assert_eq!(mgr.count(joined), BigUint::from(1u32));
//! ```

use std::cell::RefCell;
use std::cmp::{Ordering, Reverse};

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::cache::{Cache, CacheKey, CountCache, OpType};
use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::subtable::Subtable;
use crate::types::{Level, NodeId, Var};

/// Owns all nodes and performs every diagram operation.
///
/// # Design
///
/// - **Uniqueness**: identical nodes are shared (hash consing)
/// - **Zero-suppression**: nodes with `hi = ⊥` are never materialized
/// - **Canonicity**: each family has exactly one root id, so `ZddId`
///   equality is family equality and per-node memoization is exact
///
/// # Terminals
///
/// - `ZddId::ZERO` (⊥): empty family
/// - `ZddId::ONE` (⊤): family containing only the empty set
pub struct ZddManager {
    /// Node storage. Index 0 = ⊥, index 1 = ⊤.
    nodes: RefCell<Vec<ZddNode>>,

    /// Per-element unique tables.
    subtables: RefCell<Vec<Subtable>>,

    /// Element id → level in the ordering.
    level_map: RefCell<Vec<Level>>,

    /// Level → element at that level.
    var_order: RefCell<Vec<Var>>,

    /// Binary operation cache.
    cache: RefCell<Cache>,

    /// Cardinality cache.
    count_cache: RefCell<CountCache>,
}

impl Default for ZddManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ZddManager {
    // ========================================================================
    // Construction
    // ========================================================================

    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Creates a manager with specified initial node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(2));

        // Index 0: reject terminal (⊥)
        nodes.push(ZddNode::default());

        // Index 1: accept terminal (⊤)
        nodes.push(ZddNode::default());

        let mut level_map = Vec::new();
        level_map.push(Level::new(u32::MAX)); // Var(0) sentinel

        Self {
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(Vec::new()),
            level_map: RefCell::new(level_map),
            var_order: RefCell::new(Vec::new()),
            cache: RefCell::new(Cache::new()),
            count_cache: RefCell::new(CountCache::new()),
        }
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    /// The empty family (⊥).
    pub fn zero(&self) -> ZddId {
        ZddId::ZERO
    }

    /// The family containing only the empty set (⊤).
    pub fn one(&self) -> ZddId {
        ZddId::ONE
    }

    #[inline(always)]
    pub fn is_zero(&self, f: ZddId) -> bool {
        f.is_zero()
    }

    #[inline(always)]
    pub fn is_one(&self, f: ZddId) -> bool {
        f.is_one()
    }

    #[inline(always)]
    pub fn is_terminal(&self, f: ZddId) -> bool {
        f.is_terminal()
    }

    /// Returns true if the family has no members.
    pub fn is_empty(&self, f: ZddId) -> bool {
        f.is_zero()
    }

    // ========================================================================
    // Element Management
    // ========================================================================

    /// Allocates the next element of the universe.
    pub fn new_var(&self) -> Var {
        let mut level_map = self.level_map.borrow_mut();
        let new_id = level_map.len() as u32;
        let var = Var::new(new_id);

        let level = Level::new(self.var_order.borrow().len() as u32);
        self.var_order.borrow_mut().push(var);

        level_map.push(level);
        self.subtables.borrow_mut().push(Subtable::new(var));

        var
    }

    /// Ensures an element exists, allocating up to it if necessary.
    pub fn ensure_var(&self, var: Var) -> Var {
        while (self.level_map.borrow().len() as u32) <= var.id() {
            self.new_var();
        }
        var
    }

    /// Universe size: the number of allocated elements.
    pub fn num_vars(&self) -> usize {
        self.var_order.borrow().len()
    }

    /// The level of an element in the current ordering (0 = top).
    pub fn level(&self, var: Var) -> Level {
        self.level_map.borrow()[var.id() as usize]
    }

    // ========================================================================
    // Node Construction
    // ========================================================================

    /// Creates or retrieves the node `(var, lo, hi)`.
    ///
    /// This is the single point through which all diagrams are built: it
    /// applies the zero-suppression rule (`hi = ⊥` collapses to `lo`) and
    /// consults the unique table, so the output is always reduced.
    pub fn get_node(&self, var: Var, lo: ZddId, hi: ZddId) -> ZddId {
        // Zero-suppression rule
        if hi.is_zero() {
            return lo;
        }

        let level = self.level(var);

        // Check unique table
        {
            let subtables = self.subtables.borrow();
            let nodes = self.nodes.borrow();
            if let Some(id) = subtables[level.index()].find(lo, hi, &nodes) {
                return ZddId::from_node(id);
            }
        }

        // Create new node
        let node = ZddNode::new(var, lo, hi);
        let id = {
            let mut nodes = self.nodes.borrow_mut();
            let id = NodeId::new(nodes.len() as u32);
            nodes.push(node);
            id
        };

        // Insert into unique table
        {
            let mut subtables = self.subtables.borrow_mut();
            let mut nodes = self.nodes.borrow_mut();
            subtables[level.index()].insert(lo, hi, id, &mut nodes);
        }

        ZddId::from_node(id)
    }

    /// Access node data.
    pub fn node(&self, id: ZddId) -> ZddNode {
        self.nodes.borrow()[id.index()]
    }

    // ========================================================================
    // Primitive Constructors
    // ========================================================================

    /// Creates a base family: `{{var}}`.
    pub fn base(&self, var: impl Into<Var>) -> ZddId {
        let var = var.into();
        self.ensure_var(var);
        self.get_node(var, ZddId::ZERO, ZddId::ONE)
    }

    /// Creates a singleton family: `{{v1, v2, ..., vn}}`.
    pub fn singleton(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();
        if vars.is_empty() {
            return ZddId::ONE; // {∅}
        }

        for &var in &vars {
            self.ensure_var(var);
        }

        // Deepest level first for bottom-up construction
        vars.sort_unstable_by_key(|&var| Reverse(self.level(var)));

        let mut result = ZddId::ONE;
        for var in vars {
            result = self.get_node(var, ZddId::ZERO, result);
        }
        result
    }

    /// Creates the power set of the given elements: `2^{vars}`.
    pub fn powerset(&self, vars: impl IntoIterator<Item = impl Into<Var>>) -> ZddId {
        let mut vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();
        if vars.is_empty() {
            return ZddId::ONE; // 2^∅ = {∅}
        }

        for &var in &vars {
            self.ensure_var(var);
        }

        vars.sort_unstable_by_key(|&var| Reverse(self.level(var)));

        // Both branches lead to the same subtree at every element
        let mut result = ZddId::ONE;
        for var in vars {
            result = self.get_node(var, result, result);
        }
        result
    }

    /// Creates all k-element subsets of the given elements: `C(n, k)`.
    pub fn combinations(&self, vars: impl IntoIterator<Item = impl Into<Var>>, k: usize) -> ZddId {
        let vars: Vec<Var> = vars.into_iter().map(|v| v.into()).collect();

        if k == 0 {
            return ZddId::ONE;
        }
        if k > vars.len() {
            return ZddId::ZERO;
        }

        for &var in &vars {
            self.ensure_var(var);
        }

        self.combinations_rec(&vars, 0, k)
    }

    fn combinations_rec(&self, vars: &[Var], start: usize, k: usize) -> ZddId {
        if k == 0 {
            return ZddId::ONE;
        }
        if start + k > vars.len() {
            return ZddId::ZERO;
        }
        if start + k == vars.len() {
            // Must take all remaining
            return self.singleton(vars[start..].iter().copied());
        }

        let var = vars[start];
        let with_var = self.combinations_rec(vars, start + 1, k - 1);
        let without_var = self.combinations_rec(vars, start + 1, k);

        self.get_node(var, without_var, with_var)
    }

    // ========================================================================
    // Set Operations
    // ========================================================================

    /// Union: `F ∪ G` — members of either family.
    pub fn union(&self, f: ZddId, g: ZddId) -> ZddId {
        // Terminal cases
        if f.is_zero() {
            return g;
        }
        if g.is_zero() {
            return f;
        }
        if f == g {
            return f;
        }

        let key = CacheKey::commutative(OpType::Union, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let result = if f.is_one() && g.is_one() {
            ZddId::ONE
        } else if f.is_one() {
            let g_node = self.node(g);
            let lo = self.union(ZddId::ONE, g_node.lo);
            self.get_node(g_node.var, lo, g_node.hi)
        } else if g.is_one() {
            let f_node = self.node(f);
            let lo = self.union(f_node.lo, ZddId::ONE);
            self.get_node(f_node.var, lo, f_node.hi)
        } else {
            let f_node = self.node(f);
            let g_node = self.node(g);

            let f_level = self.level(f_node.var);
            let g_level = self.level(g_node.var);
            match f_level.cmp(&g_level) {
                Ordering::Less => {
                    // f branches closer to the root
                    let lo = self.union(f_node.lo, g);
                    self.get_node(f_node.var, lo, f_node.hi)
                }
                Ordering::Greater => {
                    let lo = self.union(f, g_node.lo);
                    self.get_node(g_node.var, lo, g_node.hi)
                }
                Ordering::Equal => {
                    let lo = self.union(f_node.lo, g_node.lo);
                    let hi = self.union(f_node.hi, g_node.hi);
                    self.get_node(f_node.var, lo, hi)
                }
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    /// Join: `{S ∪ T | S ∈ F, T ∈ G}` (cross product of families).
    pub fn join(&self, f: ZddId, g: ZddId) -> ZddId {
        // Terminal cases
        if f.is_zero() || g.is_zero() {
            return ZddId::ZERO;
        }
        if f.is_one() {
            return g; // {∅} ⊗ G = G
        }
        if g.is_one() {
            return f;
        }

        let key = CacheKey::commutative(OpType::Join, f, g);
        if let Some(result) = self.cache.borrow().get(&key) {
            return result;
        }

        let f_node = self.node(f);
        let g_node = self.node(g);

        let f_level = self.level(f_node.var);
        let g_level = self.level(g_node.var);
        let result = match f_level.cmp(&g_level) {
            Ordering::Less => {
                let lo = self.join(f_node.lo, g);
                let hi = self.join(f_node.hi, g);
                self.get_node(f_node.var, lo, hi)
            }
            Ordering::Greater => {
                let lo = self.join(f, g_node.lo);
                let hi = self.join(f, g_node.hi);
                self.get_node(g_node.var, lo, hi)
            }
            Ordering::Equal => {
                let lo_lo = self.join(f_node.lo, g_node.lo);
                let hi_lo = self.join(f_node.hi, g_node.lo);
                let lo_hi = self.join(f_node.lo, g_node.hi);
                let hi_hi = self.join(f_node.hi, g_node.hi);

                // The take branch collects every pairing where at least one
                // side contributes the element.
                let hi = self.union(hi_lo, self.union(lo_hi, hi_hi));
                self.get_node(f_node.var, lo_lo, hi)
            }
        };

        self.cache.borrow_mut().insert(key, result);
        result
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns true if the family contains the empty set.
    pub fn contains_empty(&self, f: ZddId) -> bool {
        if f.is_zero() {
            return false;
        }
        if f.is_one() {
            return true;
        }
        // The skip chain holds the members avoiding every element
        self.contains_empty(self.node(f).lo)
    }

    /// Returns true if the family contains the given set.
    pub fn contains(&self, f: ZddId, set: &[Var]) -> bool {
        if set.is_empty() {
            return self.contains_empty(f);
        }

        // An unknown element cannot occur in any member
        let level_map = self.level_map.borrow();
        for &var in set {
            if var.id() as usize >= level_map.len() {
                return false;
            }
        }
        drop(level_map);

        let mut sorted_set: Vec<Var> = set.to_vec();
        sorted_set.sort_unstable_by_key(|&var| self.level(var));

        self.contains_rec(f, &sorted_set, 0)
    }

    fn contains_rec(&self, f: ZddId, set: &[Var], idx: usize) -> bool {
        if idx == set.len() {
            return self.contains_empty(f);
        }
        if f.is_terminal() {
            return false;
        }

        let f_node = self.node(f);
        let var = set[idx];
        let f_level = self.level(f_node.var);
        let var_level = self.level(var);

        match f_level.cmp(&var_level) {
            Ordering::Less => self.contains_rec(f_node.lo, set, idx),
            Ordering::Equal => self.contains_rec(f_node.hi, set, idx + 1),
            Ordering::Greater => false,
        }
    }

    // ========================================================================
    // Counting
    // ========================================================================

    /// Exact number of members in the family.
    ///
    /// Memoized per node; arbitrary precision because the cardinality grows
    /// exponentially with the universe size.
    pub fn count(&self, f: ZddId) -> BigUint {
        if f.is_zero() {
            return BigUint::zero();
        }
        if f.is_one() {
            return BigUint::one();
        }

        if let Some(cached) = self.count_cache.borrow().get(f) {
            return cached;
        }

        let f_node = self.node(f);
        let count = self.count(f_node.lo) + self.count(f_node.hi);

        self.count_cache.borrow_mut().insert(f, count.clone());
        count
    }

    /// Number of distinct decision nodes reachable from `f`.
    pub fn node_count(&self, f: ZddId) -> usize {
        let mut visited = std::collections::HashSet::new();
        self.node_count_rec(f, &mut visited)
    }

    fn node_count_rec(&self, f: ZddId, visited: &mut std::collections::HashSet<ZddId>) -> usize {
        if f.is_terminal() || visited.contains(&f) {
            return 0;
        }
        visited.insert(f);
        let f_node = self.node(f);
        1 + self.node_count_rec(f_node.lo, visited) + self.node_count_rec(f_node.hi, visited)
    }

    /// Total number of nodes in the manager.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_terminals() {
        let mgr = ZddManager::new();
        assert!(mgr.is_zero(mgr.zero()));
        assert!(mgr.is_one(mgr.one()));
        assert!(mgr.is_terminal(mgr.zero()));
        assert!(mgr.is_terminal(mgr.one()));
    }

    #[test]
    fn test_base() {
        let mgr = ZddManager::new();
        let x1 = mgr.base(1);
        assert_eq!(mgr.count(x1), big(1));
        assert!(!mgr.is_terminal(x1));
    }

    #[test]
    fn test_singleton() {
        let mgr = ZddManager::new();

        let empty: Vec<Var> = vec![];
        let s0 = mgr.singleton(empty);
        assert!(mgr.is_one(s0));

        let s12 = mgr.singleton([1u32, 2]);
        assert_eq!(mgr.count(s12), big(1));
        assert!(mgr.contains(s12, &[Var::new(1), Var::new(2)]));
        assert!(!mgr.contains(s12, &[Var::new(1)]));
    }

    #[test]
    fn test_union() {
        let mgr = ZddManager::new();
        let x1 = mgr.base(1);
        let x2 = mgr.base(2);

        let union = mgr.union(x1, x2);
        assert_eq!(mgr.count(union), big(2));
    }

    #[test]
    fn test_join() {
        let mgr = ZddManager::new();
        let x1 = mgr.base(1);
        let x2 = mgr.base(2);

        // {{1}} ⊗ {{2}} = {{1, 2}}
        let joined = mgr.join(x1, x2);
        assert_eq!(mgr.count(joined), big(1));
        assert!(mgr.contains(joined, &[Var::new(1), Var::new(2)]));
    }

    #[test]
    fn test_powerset() {
        let mgr = ZddManager::new();

        // 2^{1,2} = {∅, {1}, {2}, {1,2}}
        let ps = mgr.powerset([1u32, 2]);
        assert_eq!(mgr.count(ps), big(4));
        assert!(mgr.contains_empty(ps));
    }

    #[test]
    fn test_powerset_canonical() {
        let mgr = ZddManager::new();

        // Hash consing gives the same root for the same family
        let a = mgr.powerset([1u32, 2, 3]);
        let b = mgr.powerset([1u32, 2, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_combinations() {
        let mgr = ZddManager::new();

        let c42 = mgr.combinations([1u32, 2, 3, 4], 2);
        assert_eq!(mgr.count(c42), big(6));

        let c50 = mgr.combinations([1u32, 2, 3, 4, 5], 0);
        assert!(mgr.is_one(c50));

        let c35 = mgr.combinations([1u32, 2, 3], 5);
        assert!(mgr.is_zero(c35));
    }

    #[test]
    fn test_count_large() {
        let mgr = ZddManager::new();

        // 2^70 members: far beyond u64
        let vars: Vec<u32> = (1..=70).collect();
        let ps = mgr.powerset(vars);
        assert_eq!(mgr.count(ps), BigUint::from(2u32).pow(70));
    }

    #[test]
    fn test_contains() {
        let mgr = ZddManager::new();
        let x1 = mgr.base(1);
        let x2 = mgr.base(2);
        let x12 = mgr.join(x1, x2);
        let family = mgr.union(mgr.union(x1, x2), x12);

        assert!(mgr.contains(family, &[Var::new(1)]));
        assert!(mgr.contains(family, &[Var::new(2)]));
        assert!(mgr.contains(family, &[Var::new(1), Var::new(2)]));
        assert!(!mgr.contains(family, &[]));
        assert!(!mgr.contains(family, &[Var::new(3)]));
    }
}
