//! # zdd-stats: statistics and ranked enumeration for weighted set families
//!
//! This crate analyzes combinatorially large families of subsets of a finite
//! universe, represented compactly as **Zero-Suppressed Decision Diagrams
//! (ZDDs)**. Every member set carries a value: the sum of its elements'
//! weights. The analyses never materialize the family:
//!
//! - **Moments** — one bottom-up pass computes the raw power-sum moments of
//!   the value distribution ([`moments::MomentsEvaluator`]); the order-0
//!   moment is the exact cardinality.
//! - **Random pruning** — a stochastic traversal rule
//!   ([`prune::RandomPruning`]) thins a family edge-by-edge for
//!   memory-bounded approximate analysis and bootstrap-style resampling.
//! - **Ranked enumeration** — a best-first enumerator
//!   ([`rank::WeightedIterator`]) yields members lazily in strictly
//!   non-increasing value order, using exact per-node bounds.
//!
//! The diagram substrate is a manager-centric, hash-consed ZDD: all
//! construction goes through [`zdd::ZddManager`], so every family has one
//! canonical root and node identity safely keys the memoization all three
//! analyses depend on.
//!
//! ## Quick Start
//!
//! ```
//! use zdd_stats::zdd::ZddManager;
//! use zdd_stats::weights::WeightTable;
//!
//! let mgr = ZddManager::new();
//!
//! // The family {∅, {1}, {2}, {1,2}} with weights w(1)=2, w(2)=3
//! let family = mgr.powerset([1u32, 2]);
//! let weights = WeightTable::from_weights([2, 3]);
//!
//! // Raw moments: cardinality 4, value sum 10, squared sum 38
//! let m = mgr.moments(family, &weights, 2);
//! assert_eq!(m[0], 4.into());
//! assert_eq!(m[1], 10.into());
//! assert_eq!(m[2], 38.into());
//!
//! // Members in descending value order: 5, 3, 2, 0
//! let values: Vec<i64> = mgr.iter_ranked(family, &weights).map(|s| s.value).collect();
//! assert_eq!(values, vec![5, 3, 2, 0]);
//!
//! // Reproducible random thinning
//! let thinned = mgr.prune(family, 0.5, Some(42));
//! assert!(mgr.count(thinned) <= mgr.count(family));
//! ```
//!
//! ## Modules
//!
//! - [`mod@zdd`] — the ZDD manager and family construction
//! - [`mod@rule`] — the traversal-rule seam and the subset driver
//! - [`mod@weights`] — per-element weight tables
//! - [`mod@moments`] — exact raw power-sum moments
//! - [`mod@prune`] — stochastic edge pruning
//! - [`mod@rank`] — best-first descending-value enumeration
//! - [`mod@iter`] — unranked member enumeration
//! - [`mod@dot`] — Graphviz visualization

pub mod cache;
pub mod dot;
pub mod iter;
pub mod moments;
pub mod node;
pub mod prune;
pub mod rank;
pub mod reference;
pub mod rule;
pub mod subtable;
pub mod types;
pub mod weights;
pub mod zdd;
