use crate::reference::ZddId;
use crate::types::{NodeId, Var};

/// A decision node of the shared diagram.
///
/// # Invariant
///
/// **Zero-suppression**: `hi` is never `ZddId::ZERO`. A node whose take
/// branch is ⊥ is not stored; the manager returns `lo` in its place.
///
/// # Semantics
///
/// ```text
/// F(node) = F(lo) ∪ { S ∪ {var} | S ∈ F(hi) }
/// ```
///
/// - `lo` (skip edge): member sets not containing `var`
/// - `hi` (take edge): member sets containing `var`, stored without it
#[derive(Debug, Copy, Clone)]
pub struct ZddNode {
    /// Element decided at this node (1-indexed).
    pub var: Var,
    /// Skip child: sets without `var`.
    pub lo: ZddId,
    /// Take child: sets with `var` (never ⊥).
    pub hi: ZddId,
    /// Next node in the unique-table collision chain.
    pub next: NodeId,
    /// Precomputed hash of (var, lo, hi).
    hash: u64,
}

impl Default for ZddNode {
    fn default() -> Self {
        Self {
            var: Var::ZERO,
            lo: ZddId::INVALID,
            hi: ZddId::INVALID,
            next: Self::NO_NEXT,
            hash: 0,
        }
    }
}

impl ZddNode {
    /// Sentinel for the end of a collision chain.
    pub const NO_NEXT: NodeId = NodeId::INVALID;

    /// Creates a new decision node.
    ///
    /// # Panics
    ///
    /// Debug-panics if `hi == ZddId::ZERO` (zero-suppression violation).
    pub fn new(var: Var, lo: ZddId, hi: ZddId) -> Self {
        debug_assert!(!hi.is_zero(), "take child must not be ⊥ (zero-suppression)");
        let hash = Self::compute_hash(var, lo, hi);
        Self {
            var,
            lo,
            hi,
            next: Self::NO_NEXT,
            hash,
        }
    }

    fn compute_hash(var: Var, lo: ZddId, hi: ZddId) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        var.id().hash(&mut hasher);
        lo.raw().hash(&mut hasher);
        hi.raw().hash(&mut hasher);
        hasher.finish()
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for ZddNode {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.var == other.var && self.lo == other.lo && self.hi == other.hi
    }
}

impl Eq for ZddNode {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = ZddNode::new(Var::new(1), ZddId::ZERO, ZddId::ONE);
        assert_eq!(node.var, Var::new(1));
        assert_eq!(node.lo, ZddId::ZERO);
        assert_eq!(node.hi, ZddId::ONE);
    }

    #[test]
    fn test_node_equality() {
        let n1 = ZddNode::new(Var::new(1), ZddId::ZERO, ZddId::ONE);
        let n2 = ZddNode::new(Var::new(1), ZddId::ZERO, ZddId::ONE);
        let n3 = ZddNode::new(Var::new(2), ZddId::ZERO, ZddId::ONE);

        assert_eq!(n1, n2);
        assert_ne!(n1, n3);
    }
}
