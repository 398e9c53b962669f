//! Per-element weights.
//!
//! The value of a member set is the sum of its elements' weights. The table
//! is stored with a placeholder at index 0 so that element `i` reads its
//! weight at index `i`, mirroring the 1-indexed element ids.

use crate::types::Var;

/// Ordered table of element weights, slot 0 unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    values: Vec<i64>,
}

impl WeightTable {
    /// Wraps a raw table. `values[0]` is a placeholder and never read;
    /// `values[i]` is the weight of element `i`.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty (the placeholder slot must exist).
    pub fn new(values: Vec<i64>) -> Self {
        assert!(!values.is_empty(), "weight table needs the unused slot 0");
        Self { values }
    }

    /// Builds a table from per-element weights, inserting the placeholder.
    pub fn from_weights(weights: impl IntoIterator<Item = i64>) -> Self {
        let mut values = vec![0];
        values.extend(weights);
        Self { values }
    }

    /// A table giving every one of `n` elements the same weight.
    pub fn uniform(n: usize, weight: i64) -> Self {
        Self { values: vec![weight; n + 1] }
    }

    /// Number of elements covered (table length minus the placeholder).
    pub fn universe(&self) -> usize {
        self.values.len() - 1
    }

    /// Weight of one element.
    ///
    /// # Panics
    ///
    /// Panics if the element is outside the table.
    #[inline]
    pub fn weight(&self, var: Var) -> i64 {
        self.values[var.id() as usize]
    }

    /// Total value of a member set.
    pub fn value_of(&self, set: &[Var]) -> i64 {
        set.iter().map(|&v| self.weight(v)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_weights() {
        let w = WeightTable::from_weights([2, 3]);
        assert_eq!(w.universe(), 2);
        assert_eq!(w.weight(Var::new(1)), 2);
        assert_eq!(w.weight(Var::new(2)), 3);
    }

    #[test]
    fn test_uniform() {
        let w = WeightTable::uniform(4, 7);
        assert_eq!(w.universe(), 4);
        for i in 1..=4 {
            assert_eq!(w.weight(Var::new(i)), 7);
        }
    }

    #[test]
    fn test_value_of() {
        let w = WeightTable::from_weights([2, 3, -1]);
        assert_eq!(w.value_of(&[Var::new(1), Var::new(3)]), 1);
        assert_eq!(w.value_of(&[]), 0);
    }

    #[test]
    #[should_panic]
    fn test_empty_table_rejected() {
        WeightTable::new(vec![]);
    }
}
