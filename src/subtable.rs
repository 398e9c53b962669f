//! Per-element unique table with intrusive hashing.
//!
//! Each subtable holds all nodes branching on one element, keyed by the
//! `(lo, hi)` children. Collision chains live inside the nodes themselves
//! via `ZddNode.next`, CUDD-style.

use crate::node::ZddNode;
use crate::reference::ZddId;
use crate::types::{NodeId, Var};

/// Default number of bucket bits (2^14 = 16384 buckets per element).
const DEFAULT_BUCKET_BITS: usize = 14;

/// A unique table for the nodes of a single element.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The element all nodes in this subtable branch on.
    pub variable: Var,

    /// Bucket heads; `NodeId::NO_NEXT` marks an empty bucket.
    buckets: Vec<NodeId>,

    /// Bitmask for the hash: `bucket = hash & bitmask`.
    bitmask: u64,

    /// Number of nodes in this subtable.
    count: usize,
}

impl Subtable {
    pub fn new(variable: Var) -> Self {
        Self::with_bucket_bits(variable, DEFAULT_BUCKET_BITS)
    }

    pub fn with_bucket_bits(variable: Var, bits: usize) -> Self {
        let num_buckets = 1 << bits;
        let bitmask = (num_buckets - 1) as u64;
        Self {
            variable,
            buckets: vec![ZddNode::NO_NEXT; num_buckets],
            bitmask,
            count: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, lo: ZddId, hi: ZddId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Looks up a node by its children.
    pub fn find(&self, lo: ZddId, hi: ZddId, nodes: &[ZddNode]) -> Option<NodeId> {
        let bucket = self.bucket_index(lo, hi);
        let mut current = self.buckets[bucket];

        while current != ZddNode::NO_NEXT {
            let node = &nodes[current.index()];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }

        None
    }

    /// Inserts a node, chaining it at the head of its bucket.
    pub fn insert(&mut self, lo: ZddId, hi: ZddId, id: NodeId, nodes: &mut [ZddNode]) {
        let bucket = self.bucket_index(lo, hi);
        let old_head = self.buckets[bucket];
        self.buckets[bucket] = id;
        nodes[id.index()].next = old_head;
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// FNV-1a style mixing of the two children.
#[inline]
fn hash_children(lo: ZddId, hi: ZddId) -> u64 {
    let mut h = 14695981039346656037u64;
    h ^= lo.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h ^= hi.raw() as u64;
    h = h.wrapping_mul(1099511628211);
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtable_basic() {
        let mut nodes = vec![ZddNode::default(); 10];
        let mut subtable = Subtable::new(Var::new(1));

        let lo = ZddId::ZERO;
        let hi = ZddId::ONE;
        nodes[2] = ZddNode::new(Var::new(1), lo, hi);

        subtable.insert(lo, hi, NodeId::new(2), &mut nodes);
        assert_eq!(subtable.len(), 1);

        assert_eq!(subtable.find(lo, hi, &nodes), Some(NodeId::new(2)));
        assert_eq!(subtable.find(ZddId::ONE, ZddId::ONE, &nodes), None);
    }
}
