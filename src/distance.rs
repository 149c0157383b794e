//! Squared Euclidean distance in the two representations the pipeline
//! uses: dense 0/1 vectors and sparse presence sets.
//!
//! The square root is never taken. Nearest-centroid comparisons only
//! rank distances, and squaring is monotonic, so the rankings agree.

use std::collections::BTreeSet;

/// Squared Euclidean distance between two dense vectors of equal length.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x - y)
        .map(|d| d * d)
        .sum()
}

/// Squared Euclidean distance between two presence sets.
///
/// A missing entity counts as 0 and a present one as 1, so only
/// entities present in exactly one of the two sets contribute, each
/// adding `(1 - 0)^2 = 1`. The distance is therefore the size of the
/// symmetric difference, which matches [`squared_euclidean`] on the
/// dense encodings of the same sets.
#[inline]
pub fn sparse_squared_euclidean(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    a.symmetric_difference(b).count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(entities: &[&str]) -> BTreeSet<String> {
        entities.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn dense_known_values() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
        assert_eq!(squared_euclidean(&[1.0, 0.0], &[0.0, 1.0]), 2.0);
        assert_eq!(squared_euclidean(&[1.0, 1.0, 0.0], &[1.0, 0.0, 1.0]), 2.0);
        assert_eq!(squared_euclidean(&[0.5, 0.0], &[0.0, 0.5]), 0.5);
    }

    #[test]
    fn dense_is_symmetric() {
        let a = [1.0, 0.0, 1.0, 0.0];
        let b = [0.0, 1.0, 1.0, 1.0];
        assert_eq!(squared_euclidean(&a, &b), squared_euclidean(&b, &a));
    }

    #[test]
    fn sparse_counts_symmetric_difference() {
        let a = set(&["fern", "moss", "oak"]);
        let b = set(&["moss", "pine"]);
        // fern and oak on one side, pine on the other
        assert_eq!(sparse_squared_euclidean(&a, &b), 3.0);
        assert_eq!(sparse_squared_euclidean(&b, &a), 3.0);
        assert_eq!(sparse_squared_euclidean(&a, &a), 0.0);
    }

    #[test]
    fn sparse_agrees_with_dense_encoding() {
        let a = set(&["e1", "e3"]);
        let b = set(&["e2", "e3", "e4"]);
        // dense over the entity order e1..e4
        let da = [1.0, 0.0, 1.0, 0.0];
        let db = [0.0, 1.0, 1.0, 1.0];
        assert_eq!(sparse_squared_euclidean(&a, &b), squared_euclidean(&da, &db));
    }
}
