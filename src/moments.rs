//! Raw power-sum moments of the value distribution over a family.
//!
//! A single bottom-up pass computes, for the family encoded by a diagram,
//! the vector `M` with `M[k] = Σ_S value(S)^k` over all members `S`. The
//! order-0 entry is therefore the exact cardinality. Skip and take branches
//! of a node encode disjoint sub-families, so their moment vectors add; the
//! take branch is first shifted by the node's weight via the binomial
//! identity
//!
//! ```text
//! Σ (v + a)^k  =  Σ_p C(k,p) · a^p · Σ v^(k-p)
//! ```
//!
//! All accumulation is exact (`BigInt`): cardinalities and high-order
//! moments overflow machine integers long before diagrams get interesting.

use std::collections::HashMap;
use std::ops::Index;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

use crate::reference::ZddId;
use crate::weights::WeightTable;
use crate::zdd::ZddManager;

/// Raw moments of a family's value distribution; index k is the k-th
/// power sum, index 0 the exact member count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentVector {
    raw: Vec<BigInt>,
}

impl MomentVector {
    fn new(raw: Vec<BigInt>) -> Self {
        debug_assert!(!raw.is_empty());
        Self { raw }
    }

    /// Highest moment order held.
    pub fn order(&self) -> usize {
        self.raw.len() - 1
    }

    /// Exact cardinality of the family (the order-0 moment).
    pub fn cardinality(&self) -> &BigInt {
        &self.raw[0]
    }

    /// The raw k-th power-sum moment.
    pub fn raw(&self, k: usize) -> &BigInt {
        &self.raw[k]
    }

    /// The k-th moment divided by the cardinality, as a float.
    ///
    /// Returns `None` for the empty family.
    pub fn normalized(&self, k: usize) -> Option<f64> {
        if self.raw[0].is_zero() {
            return None;
        }
        Some(self.raw[k].to_f64()? / self.raw[0].to_f64()?)
    }

    pub fn as_slice(&self) -> &[BigInt] {
        &self.raw
    }
}

impl Index<usize> for MomentVector {
    type Output = BigInt;

    fn index(&self, k: usize) -> &BigInt {
        &self.raw[k]
    }
}

/// Bottom-up moments evaluator.
///
/// Holds the moment order, an optional baseline (`offset · scale` is added
/// to every member's value), and the Pascal triangle of binomial
/// coefficients, computed once and shared across every node of the pass.
pub struct MomentsEvaluator {
    order: usize,
    offset: i64,
    scale: i64,
    binom: Vec<Vec<BigInt>>,
}

impl MomentsEvaluator {
    /// Evaluator for moments up to `order`, with no baseline.
    pub fn new(order: usize) -> Self {
        Self::with_baseline(order, 0, 1)
    }

    /// Evaluator with a baseline: every member's value is treated as
    /// `offset · scale + Σ weight(e) · scale`.
    pub fn with_baseline(order: usize, offset: i64, scale: i64) -> Self {
        Self {
            order,
            offset,
            scale,
            binom: pascal(order),
        }
    }

    /// Computes the moment vector of the family rooted at `f`.
    ///
    /// Each reachable node is evaluated exactly once, memoized by node
    /// identity (sound: the manager's diagrams are reduced).
    ///
    /// # Panics
    ///
    /// Panics if the weight table does not cover the allocated universe.
    pub fn evaluate(&self, mgr: &ZddManager, f: ZddId, weights: &WeightTable) -> MomentVector {
        assert!(
            weights.universe() >= mgr.num_vars(),
            "weight table covers {} elements, universe has {}",
            weights.universe(),
            mgr.num_vars()
        );

        let mut memo: HashMap<ZddId, Rc<Vec<BigInt>>> = HashMap::new();
        let accept = Rc::new(self.accept_vector());
        let result = self.eval_rec(mgr, f, weights, &accept, &mut memo);

        log::debug!("moments: order {}, {} nodes evaluated", self.order, memo.len());
        MomentVector::new(result.as_ref().clone())
    }

    /// Vector for the accept terminal: entry k is `(offset · scale)^k`.
    fn accept_vector(&self) -> Vec<BigInt> {
        let base = BigInt::from(self.offset) * BigInt::from(self.scale);
        let mut v = Vec::with_capacity(self.order + 1);
        v.push(BigInt::one());
        for k in 1..=self.order {
            v.push(&v[k - 1] * &base);
        }
        v
    }

    fn eval_rec(
        &self,
        mgr: &ZddManager,
        f: ZddId,
        weights: &WeightTable,
        accept: &Rc<Vec<BigInt>>,
        memo: &mut HashMap<ZddId, Rc<Vec<BigInt>>>,
    ) -> Rc<Vec<BigInt>> {
        if f.is_zero() {
            // The reject terminal contributes no members at all
            return Rc::new(vec![BigInt::zero(); self.order + 1]);
        }
        if f.is_one() {
            return Rc::clone(accept);
        }

        if let Some(cached) = memo.get(&f) {
            return Rc::clone(cached);
        }

        let node = mgr.node(f);
        let skip = self.eval_rec(mgr, node.lo, weights, accept, memo);
        let take = self.eval_rec(mgr, node.hi, weights, accept, memo);

        // Shift applied to every member of the take branch
        let a = BigInt::from(weights.weight(node.var)) * BigInt::from(self.scale);
        let mut apow = Vec::with_capacity(self.order + 1);
        apow.push(BigInt::one());
        for p in 1..=self.order {
            apow.push(&apow[p - 1] * &a);
        }

        let mut result = Vec::with_capacity(self.order + 1);
        for k in 0..=self.order {
            let mut acc = skip[k].clone();
            for p in 0..=k {
                acc += &self.binom[k][p] * &take[k - p] * &apow[p];
            }
            result.push(acc);
        }

        let result = Rc::new(result);
        memo.insert(f, Rc::clone(&result));
        result
    }
}

/// Pascal's triangle up to row `order`, exact.
fn pascal(order: usize) -> Vec<Vec<BigInt>> {
    let mut rows: Vec<Vec<BigInt>> = Vec::with_capacity(order + 1);
    for k in 0..=order {
        let mut row = vec![BigInt::one(); k + 1];
        for p in 1..k {
            row[p] = &rows[k - 1][p - 1] + &rows[k - 1][p];
        }
        rows.push(row);
    }
    rows
}

impl ZddManager {
    /// Moments of the family rooted at `f`, up to `order`, with no baseline.
    pub fn moments(&self, f: ZddId, weights: &WeightTable, order: usize) -> MomentVector {
        MomentsEvaluator::new(order).evaluate(self, f, weights)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn bi(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_pascal() {
        let t = pascal(4);
        assert_eq!(t[0], vec![bi(1)]);
        assert_eq!(t[2], vec![bi(1), bi(2), bi(1)]);
        assert_eq!(t[4], vec![bi(1), bi(4), bi(6), bi(4), bi(1)]);
    }

    #[test]
    fn test_powerset_two_elements() {
        // Family {∅, {a}, {b}, {a,b}} with w(a)=2, w(b)=3: values 0, 2, 3, 5
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32, 2]);
        let w = WeightTable::from_weights([2, 3]);

        let m = mgr.moments(ps, &w, 2);
        assert_eq!(m[0], bi(4));
        assert_eq!(m[1], bi(10));
        assert_eq!(m[2], bi(38)); // 0 + 4 + 9 + 25
    }

    #[test]
    fn test_single_element() {
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32]);
        let w = WeightTable::from_weights([7]);

        let m = mgr.moments(ps, &w, 2);
        assert_eq!(m[0], bi(2));
        assert_eq!(m[1], bi(7));
        assert_eq!(m[2], bi(49));
    }

    #[test]
    fn test_empty_family() {
        let mgr = ZddManager::new();
        mgr.ensure_var(crate::types::Var::new(2));
        let w = WeightTable::from_weights([1, 1]);

        let m = mgr.moments(ZddId::ZERO, &w, 3);
        for k in 0..=3 {
            assert_eq!(m[k], bi(0));
        }
        assert_eq!(m.normalized(1), None);
    }

    #[test]
    fn test_cardinality_matches_count() {
        let mgr = ZddManager::new();
        let c = mgr.combinations(1u32..=6, 3);
        let w = WeightTable::uniform(6, 1);

        let m = mgr.moments(c, &w, 1);
        assert_eq!(m.cardinality().to_string(), mgr.count(c).to_string());
        // Every 3-element subset has value 3 under uniform weight 1
        assert_eq!(m[1], bi(20 * 3));
    }

    #[test]
    fn test_baseline_offset() {
        // {∅} with baseline offset 5: single member of value 5
        let mgr = ZddManager::new();
        let eval = MomentsEvaluator::with_baseline(2, 5, 1);
        let w = WeightTable::uniform(0, 0);

        let m = eval.evaluate(&mgr, ZddId::ONE, &w);
        assert_eq!(m[0], bi(1));
        assert_eq!(m[1], bi(5));
        assert_eq!(m[2], bi(25));
    }

    #[test]
    fn test_baseline_scale() {
        // Doubling the scale doubles every member value
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32, 2]);
        let w = WeightTable::from_weights([2, 3]);

        let m = MomentsEvaluator::with_baseline(2, 0, 2).evaluate(&mgr, ps, &w);
        assert_eq!(m[0], bi(4));
        assert_eq!(m[1], bi(20));
        assert_eq!(m[2], bi(4 * 38));
    }

    #[test]
    fn test_negative_weights() {
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32, 2]);
        let w = WeightTable::from_weights([-2, 3]);

        // Values: 0, -2, 3, 1
        let m = mgr.moments(ps, &w, 2);
        assert_eq!(m[1], bi(2));
        assert_eq!(m[2], bi(4 + 9 + 1));
    }

    #[test]
    fn test_normalized() {
        let mgr = ZddManager::new();
        let ps = mgr.powerset([1u32, 2]);
        let w = WeightTable::from_weights([2, 3]);

        let m = mgr.moments(ps, &w, 1);
        assert_eq!(m.normalized(1), Some(2.5)); // mean of 0, 2, 3, 5
    }
}
