//! Cross-checks between the three analyses.
//!
//! Moments, pruning, and ranked enumeration are computed independently, so
//! their agreement on the same diagrams is a strong correctness signal:
//! the enumerator's emitted count must equal the order-0 moment, its value
//! sum the order-1 moment, and so on.

use num_bigint::BigInt;

use zdd_stats::moments::MomentsEvaluator;
use zdd_stats::prune::RandomPruning;
use zdd_stats::reference::ZddId;
use zdd_stats::types::Var;
use zdd_stats::weights::WeightTable;
use zdd_stats::zdd::ZddManager;

/// Exhausts the enumerator and checks its output against the moments pass.
fn cross_check(mgr: &ZddManager, f: ZddId, weights: &WeightTable) {
    let m = mgr.moments(f, weights, 2);

    let mut emitted = BigInt::from(0);
    let mut value_sum = BigInt::from(0);
    let mut square_sum = BigInt::from(0);
    let mut last = i64::MAX;

    let mut it = mgr.iter_ranked(f, weights);
    while it.advance() {
        let value = it.current_value().unwrap();
        assert!(value <= last, "ranked output must be non-increasing");
        last = value;

        emitted += 1;
        value_sum += BigInt::from(value);
        square_sum += BigInt::from(value) * BigInt::from(value);

        // The emitted elements must actually sum to the emitted value
        let solution = it.current().unwrap();
        assert_eq!(weights.value_of(&solution.elements), value);
        assert!(mgr.contains(f, &solution.elements));
    }

    assert_eq!(&emitted, m.cardinality());
    assert_eq!(&value_sum, m.raw(1));
    assert_eq!(&square_sum, m.raw(2));
}

// ─── Moments vs Enumerator ─────────────────────────────────────────────────────

#[test]
fn powerset_cross_check() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset(1u32..=6);
    let weights = WeightTable::from_weights([3, 1, 4, 1, 5, 9]);

    cross_check(&mgr, ps, &weights);
}

#[test]
fn combinations_cross_check() {
    let mgr = ZddManager::new();
    let c = mgr.combinations(1u32..=7, 3);
    let weights = WeightTable::from_weights([2, -3, 5, 0, 1, -1, 4]);

    cross_check(&mgr, c, &weights);
}

#[test]
fn irregular_family_cross_check() {
    let mgr = ZddManager::new();
    // {{1}, {2,3}, {1,3,4}, ∅}
    let family = mgr.union(
        mgr.union(mgr.singleton([1u32]), mgr.singleton([2u32, 3])),
        mgr.union(mgr.singleton([1u32, 3, 4]), mgr.one()),
    );
    let weights = WeightTable::from_weights([10, -2, 7, 1]);

    cross_check(&mgr, family, &weights);
}

#[test]
fn first_emitted_equals_best() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset(1u32..=5);
    let weights = WeightTable::from_weights([2, -4, 6, 0, 3]);

    // Positive weights taken, negatives skipped; zero-weight ties go to take
    let top = mgr.iter_ranked(ps, &weights).next().unwrap();
    assert_eq!(top.value, 11);
    assert_eq!(
        top.elements,
        vec![Var::new(1), Var::new(3), Var::new(4), Var::new(5)]
    );
}

// ─── Pruning ───────────────────────────────────────────────────────────────────

#[test]
fn pruned_diagrams_cross_check() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset(1u32..=8);
    let weights = WeightTable::from_weights([1, 2, 3, 4, 5, 6, 7, 8]);

    for seed in 0..5 {
        let pruned = mgr.prune(ps, 0.5, Some(seed));
        cross_check(&mgr, pruned, &weights);
    }
}

#[test]
fn prune_identity_and_annihilation() {
    let mgr = ZddManager::new();
    let c = mgr.combinations(1u32..=6, 2);

    assert_eq!(mgr.prune(c, 0.0, Some(99)), c);
    assert!(mgr.prune(c, 1.0, Some(99)).is_zero());
}

#[test]
fn prune_determinism_across_runs() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset(1u32..=10);
    let weights = WeightTable::uniform(10, 1);

    let a = mgr.prune(ps, 0.25, Some(1234));
    let b = mgr.prune(ps, 0.25, Some(1234));
    assert_eq!(a, b);

    // Same seed, same diagram: identical ranked output too
    let ra: Vec<_> = mgr.iter_ranked(a, &weights).collect();
    let rb: Vec<_> = mgr.iter_ranked(b, &weights).collect();
    assert_eq!(ra, rb);
}

#[test]
fn survival_bound_limits() {
    let never = RandomPruning::with_seed(4, 0.0, 0);
    assert_eq!(never.survival_bound(1), 1.0);

    let always = RandomPruning::with_seed(4, 1.0, 0);
    assert_eq!(always.survival_bound(3), 0.0);
}

// ─── Moments with baseline ─────────────────────────────────────────────────────

#[test]
fn baseline_shifts_every_member() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset([1u32, 2]);
    let weights = WeightTable::from_weights([2, 3]);

    // Values 0,2,3,5 shifted by 10: 10,12,13,15
    let m = MomentsEvaluator::with_baseline(2, 10, 1).evaluate(&mgr, ps, &weights);
    assert_eq!(m[0], BigInt::from(4));
    assert_eq!(m[1], BigInt::from(10 + 12 + 13 + 15));
    assert_eq!(
        m[2],
        BigInt::from(100 + 144 + 169 + 225)
    );
}

#[test]
fn high_order_moments_stay_exact() {
    let mgr = ZddManager::new();
    let ps = mgr.powerset(1u32..=12);
    let weights = WeightTable::uniform(12, 1000);

    // Members of size s have value 1000·s; moment 6 of the largest member
    // alone is 12000^6 ≈ 3·10^24, beyond u64
    let m = mgr.moments(ps, &weights, 6);
    assert_eq!(m[0], BigInt::from(4096));
    assert!(m.raw(6) > &BigInt::from(u64::MAX));

    // Independent check of the order-1 moment: Σ_s C(12,s)·1000·s
    let expected: i128 = (0..=12i128)
        .map(|s| binom(12, s) * 1000 * s)
        .sum();
    assert_eq!(m[1], BigInt::from(expected));
}

fn binom(n: i128, k: i128) -> i128 {
    if k == 0 || k == n {
        return 1;
    }
    binom(n - 1, k - 1) * n / k
}
