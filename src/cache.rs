//! Operation caches for the manager.
//!
//! Binary set operations and cardinality counting are memoized by node
//! identity, which is sound because nodes are hash-consed.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::reference::ZddId;

/// Cache key for binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: OpType,
    pub f: ZddId,
    pub g: ZddId,
}

/// Operation types for caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    Union,
    Join,
}

impl CacheKey {
    /// Key for a commutative operation, normalizing operand order.
    pub fn commutative(op: OpType, f: ZddId, g: ZddId) -> Self {
        let (f, g) = if f.raw() <= g.raw() { (f, g) } else { (g, f) };
        Self { op, f, g }
    }
}

/// Binary operation cache.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    map: HashMap<CacheKey, ZddId>,
}

impl Cache {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn get(&self, key: &CacheKey) -> Option<ZddId> {
        self.map.get(key).copied()
    }

    pub fn insert(&mut self, key: CacheKey, value: ZddId) {
        self.map.insert(key, value);
    }
}

/// Cache for exact cardinality counting.
///
/// Counts are arbitrary precision: a family over n elements can have up to
/// 2^n members, which overflows any machine integer for modest n.
#[derive(Debug, Clone, Default)]
pub struct CountCache {
    map: HashMap<ZddId, BigUint>,
}

impl CountCache {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn get(&self, id: ZddId) -> Option<BigUint> {
        self.map.get(&id).cloned()
    }

    pub fn insert(&mut self, id: ZddId, count: BigUint) {
        self.map.insert(id, count);
    }
}
